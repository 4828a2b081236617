//! Error types for series preparation
//!
//! This module provides the [`SeriesError`] enum and [`Result`] type alias.

mod series_error;

pub use series_error::{Result, SeriesError};
