//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct FitnessConfig {
    /// Idle period after the last change before dirty categories are flushed.
    pub autosave_delay: Duration,
    /// Simulated latency before an assistant reply is delivered.
    pub reply_delay: Duration,
    /// Port for the HTTP surface. `None` keeps the binary in REPL-only mode.
    pub http_port: Option<u16>,
    /// Display name used to seed a fresh profile.
    pub user_name: Option<String>,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            autosave_delay: Duration::from_millis(2000),
            reply_delay: Duration::from_millis(800),
            http_port: None,
            user_name: None,
        }
    }
}

pub mod env_keys {
    pub const AUTOSAVE_DELAY_MS: &str = "FITNESS_AUTOSAVE_DELAY_MS";
    pub const REPLY_DELAY_MS: &str = "FITNESS_REPLY_DELAY_MS";
    pub const HTTP_PORT: &str = "FITNESS_HTTP_PORT";
    pub const USER_NAME: &str = "FITNESS_USER_NAME";
}

impl FitnessConfig {
    /// Build a config from process environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(env_keys::AUTOSAVE_DELAY_MS) {
            config.autosave_delay = Duration::from_millis(parse_number(env_keys::AUTOSAVE_DELAY_MS, &raw)?);
        }
        if let Some(raw) = lookup(env_keys::REPLY_DELAY_MS) {
            config.reply_delay = Duration::from_millis(parse_number(env_keys::REPLY_DELAY_MS, &raw)?);
        }
        if let Some(raw) = lookup(env_keys::HTTP_PORT) {
            let port = parse_number(env_keys::HTTP_PORT, &raw)?;
            let port = u16::try_from(port).map_err(|_| ConfigError::InvalidValue {
                key: env_keys::HTTP_PORT.to_string(),
                message: format!("{port} is not a valid port"),
            })?;
            config.http_port = Some(port);
        }
        if let Some(name) = lookup(env_keys::USER_NAME) {
            let name = name.trim();
            if !name.is_empty() {
                config.user_name = Some(name.to_string());
            }
        }

        Ok(config)
    }

    /// Config for tests: no reply pacing, short autosave window.
    pub fn for_tests() -> Self {
        Self {
            autosave_delay: Duration::from_millis(50),
            reply_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{raw:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = FitnessConfig::default();
        assert_eq!(config.autosave_delay, Duration::from_millis(2000));
        assert_eq!(config.reply_delay, Duration::from_millis(800));
        assert!(config.http_port.is_none());
        assert!(config.user_name.is_none());
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = FitnessConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.autosave_delay, Duration::from_millis(2000));
    }

    #[test]
    fn overrides_are_applied() {
        let config = FitnessConfig::from_lookup(lookup_from(&[
            (env_keys::AUTOSAVE_DELAY_MS, "500"),
            (env_keys::REPLY_DELAY_MS, "0"),
            (env_keys::HTTP_PORT, "8090"),
            (env_keys::USER_NAME, "  Ana "),
        ]))
        .unwrap();
        assert_eq!(config.autosave_delay, Duration::from_millis(500));
        assert_eq!(config.reply_delay, Duration::ZERO);
        assert_eq!(config.http_port, Some(8090));
        assert_eq!(config.user_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = FitnessConfig::from_lookup(lookup_from(&[(env_keys::AUTOSAVE_DELAY_MS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == env_keys::AUTOSAVE_DELAY_MS));
    }

    #[test]
    fn out_of_range_port_is_rejected() {
        let err = FitnessConfig::from_lookup(lookup_from(&[(env_keys::HTTP_PORT, "70000")]))
            .unwrap_err();
        assert!(err.to_string().contains("not a valid port"));
    }

    #[test]
    fn blank_user_name_is_ignored() {
        let config = FitnessConfig::from_lookup(lookup_from(&[(env_keys::USER_NAME, "   ")])).unwrap();
        assert!(config.user_name.is_none());
    }
}
