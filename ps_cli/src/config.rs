//! CLI configuration management.
//!
//! Consolidates all environment variable reads; command-line flags take
//! precedence over the environment, which takes precedence over defaults.

use poker_session::session::{SessionConfig, SessionMode};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Load the session configuration
///
/// # Arguments
///
/// * `mode_override` - Optional mode (from `--mode`)
/// * `tolerance_override` - Optional tolerance (from `--tolerance`)
///
/// # Errors
///
/// Returns error if a variable is set but can't be parsed, or the resulting
/// configuration fails validation
pub fn session_config_from_env(
    mode_override: Option<SessionMode>,
    tolerance_override: Option<Decimal>,
) -> Result<SessionConfig, ConfigError> {
    let defaults = SessionConfig::default();

    let mode = match mode_override {
        Some(mode) => mode,
        None => parse_env("SESSION_MODE")?.unwrap_or(defaults.mode),
    };
    let tolerance = match tolerance_override {
        Some(tolerance) => tolerance,
        None => parse_env("SESSION_TOLERANCE")?.unwrap_or(defaults.tolerance),
    };

    let config = SessionConfig {
        mode,
        tolerance,
        max_rebuys_per_round: parse_env("SESSION_MAX_REBUYS")?,
        max_add_ons_per_round: parse_env("SESSION_MAX_ADDONS")?,
        proportion_policy: defaults.proportion_policy,
    };

    config.validate().map_err(|reason| ConfigError::Invalid {
        var: "SESSION_*".to_string(),
        reason,
    })?;

    Ok(config)
}

/// Parse an optional environment variable, failing on malformed values
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "SESSION_MODE",
        "SESSION_TOLERANCE",
        "SESSION_MAX_REBUYS",
        "SESSION_MAX_ADDONS",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment are serialized
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment are serialized
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = session_config_from_env(None, None).unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    #[serial]
    fn test_env_values_applied() {
        clear_env();
        set_env("SESSION_MODE", "tournament");
        set_env("SESSION_TOLERANCE", "0.05");
        set_env("SESSION_MAX_REBUYS", "2");
        let config = session_config_from_env(None, None).unwrap();
        assert_eq!(config.mode, SessionMode::Tournament);
        assert_eq!(config.tolerance, dec!(0.05));
        assert_eq!(config.max_rebuys_per_round, Some(2));
        assert_eq!(config.max_add_ons_per_round, None);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_flags_override_env() {
        clear_env();
        set_env("SESSION_MODE", "tournament");
        set_env("SESSION_TOLERANCE", "0.05");
        let config = session_config_from_env(Some(SessionMode::Cash), Some(dec!(0.01))).unwrap();
        assert_eq!(config.mode, SessionMode::Cash);
        assert_eq!(config.tolerance, dec!(0.01));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_env_rejected() {
        clear_env();
        set_env("SESSION_MAX_REBUYS", "lots");
        let err = session_config_from_env(None, None).unwrap_err();
        assert!(err.to_string().contains("SESSION_MAX_REBUYS"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_cash_game_with_limits_rejected() {
        clear_env();
        set_env("SESSION_MAX_ADDONS", "1");
        let err = session_config_from_env(Some(SessionMode::Cash), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
        clear_env();
    }
}
