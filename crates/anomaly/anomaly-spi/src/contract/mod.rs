//! Contracts (traits) for anomaly detection.

mod anomaly_detector;

pub use anomaly_detector::{AnomalyDetector, ScanTarget};
