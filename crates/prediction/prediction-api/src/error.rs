//! Configuration errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An environment variable is set but does not parse
    #[error("Invalid value for {name}: '{value}'")]
    InvalidEnv { name: String, value: String },

    /// A setting is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = ConfigError::InvalidEnv {
            name: "ENGINE_FIT_TIMEOUT_MS".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value for ENGINE_FIT_TIMEOUT_MS: 'soon'");
        assert_eq!(
            ConfigError::Invalid("batch_limit must be at least 1".into()).to_string(),
            "Invalid configuration: batch_limit must be at least 1"
        );
    }
}
