//! Error types for accuracy tracking.

mod accuracy_error;

pub use accuracy_error::{AccuracyError, Result, StoreError, StoreResult};
