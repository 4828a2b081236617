//! Accuracy tracker configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyConfig {
    /// Floor for `|actual|` in the percentage error denominator (default: 1e-6).
    pub epsilon: f64,
    /// Compare-and-swap attempts per performance recompute (default: 16).
    pub max_cas_retries: u32,
    /// Records returned by a listing without an explicit limit (default: 50).
    pub default_list_limit: usize,
    /// Largest accepted listing limit (default: 500).
    pub max_list_limit: usize,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            max_cas_retries: 16,
            default_list_limit: 50,
            max_list_limit: 500,
        }
    }
}

impl AccuracyConfig {
    /// Resolve a caller-supplied listing limit.
    pub fn list_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_list_limit)
            .clamp(1, self.max_list_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_limit() {
        let config = AccuracyConfig::default();
        assert_eq!(config.list_limit(None), 50);
        assert_eq!(config.list_limit(Some(10)), 10);
        assert_eq!(config.list_limit(Some(10_000)), 500);
        assert_eq!(config.list_limit(Some(0)), 1);
    }
}
