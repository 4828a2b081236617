//! Data models for anomaly detection.

mod anomaly_record;

pub use anomaly_record::{AnomalyKind, AnomalyRecord, Severity};
