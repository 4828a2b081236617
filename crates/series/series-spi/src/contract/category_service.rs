//! Category ownership trait definition.

use async_trait::async_trait;

use crate::error::Result;

/// Category lookups needed before a category-scoped forecast.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// `true` when the category exists and belongs to `user_id`.
    async fn exists_and_owned(&self, category_id: &str, user_id: &str) -> Result<bool>;
}
