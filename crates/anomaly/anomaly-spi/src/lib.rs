//! Anomaly Detection Service Provider Interface
//!
//! Defines traits and types for flagging unusual spending in a prepared
//! series.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AnomalyDetector, ScanTarget};
pub use error::{AnomalyError, Result};
pub use model::{AnomalyKind, AnomalyRecord, Severity};
