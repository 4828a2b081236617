//! Decomposition result model

/// Result of an additive decomposition: `data[i] = trend[i] + seasonal[i] + residual[i]`
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionResult {
    /// Trend component
    pub trend: Vec<f64>,
    /// Seasonal component
    pub seasonal: Vec<f64>,
    /// Residual component
    pub residual: Vec<f64>,
}

impl DecompositionResult {
    /// One cycle of the seasonal component, indexed by position in the cycle.
    pub fn seasonal_profile(&self, period: usize) -> Vec<f64> {
        if period == 0 {
            return Vec::new();
        }
        (0..period)
            .map(|pos| self.seasonal.get(pos).copied().unwrap_or(0.0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seasonal_profile_takes_first_cycle() {
        let result = DecompositionResult {
            trend: vec![0.0; 6],
            seasonal: vec![1.0, -1.0, 0.5, 1.0, -1.0, 0.5],
            residual: vec![0.0; 6],
        };
        assert_eq!(result.seasonal_profile(3), vec![1.0, -1.0, 0.5]);
        assert!(result.seasonal_profile(0).is_empty());
    }

    #[test]
    fn test_seasonal_profile_pads_short_component() {
        let result = DecompositionResult {
            trend: vec![],
            seasonal: vec![2.0],
            residual: vec![],
        };
        assert_eq!(result.seasonal_profile(3), vec![2.0, 0.0, 0.0]);
    }
}
