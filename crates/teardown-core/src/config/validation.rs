//! Configuration validation logic.

use crate::config::types::TeardownConfig;
use crate::errors::ConfigError;

/// Validate a TeardownConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `delete.timeout_secs` and `delete.poll_interval_secs` must be non-zero
/// - the poll interval must not exceed the timeout
/// - `stacks.prefix`, if set, must be non-empty and contain no whitespace
pub fn validate_config(config: &TeardownConfig) -> Result<(), ConfigError> {
    let timeout = config.delete.timeout_secs();
    let interval = config.delete.poll_interval_secs();

    if timeout == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "delete.timeout_secs must be greater than 0".to_string(),
        });
    }

    if interval == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "delete.poll_interval_secs must be greater than 0".to_string(),
        });
    }

    if interval > timeout {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "delete.poll_interval_secs ({}) must not exceed delete.timeout_secs ({})",
                interval, timeout
            ),
        });
    }

    if let Some(ref prefix) = config.stacks.prefix
        && (prefix.is_empty() || prefix.chars().any(char::is_whitespace))
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("Invalid stacks.prefix '{}'", prefix),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&TeardownConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = TeardownConfig::default();
        config.delete.timeout_secs = Some(0);

        let result = validate_config(&config);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_interval_longer_than_timeout_rejected() {
        let mut config = TeardownConfig::default();
        config.delete.timeout_secs = Some(10);
        config.delete.poll_interval_secs = Some(30);

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("must not exceed"));
    }

    #[test]
    fn test_blank_prefix_rejected() {
        let mut config = TeardownConfig::default();
        config.stacks.prefix = Some("my prefix".to_string());
        assert!(validate_config(&config).is_err());

        config.stacks.prefix = Some(String::new());
        assert!(validate_config(&config).is_err());
    }
}
