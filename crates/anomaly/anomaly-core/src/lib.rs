//! Anomaly Detection Core
//!
//! Detector implementations over prepared series:
//!
//! - [`MadDetector`]: daily totals above `median + k * MAD`
//! - [`CategorySpikeDetector`]: weekly category totals above a multiple of
//!   their trailing average

mod detectors;
mod robust;

pub use anomaly_api::AnomalyConfig;
pub use anomaly_spi::{
    AnomalyDetector, AnomalyError, AnomalyKind, AnomalyRecord, Result, ScanTarget, Severity,
};

pub use detectors::{CategorySpikeDetector, MadDetector, MIN_POINTS};
pub use robust::{median, robust_spread};
