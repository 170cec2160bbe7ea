use serde::{Deserialize, Deserializer};
use thiserror::Error;
use web_time::Duration;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Demo timings and initial keys. Durations are milliseconds when
/// deserialized.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    #[serde(deserialize_with = "millis")]
    pub fetch_delay: Duration,
    #[serde(deserialize_with = "millis")]
    pub task_duration: Duration,
    pub initial_user_id: u32,
    pub listener_initially_active: bool,
    #[serde(deserialize_with = "millis")]
    pub frame_interval: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            fetch_delay: Duration::from_millis(2000),
            task_duration: Duration::from_millis(3000),
            initial_user_id: 101,
            listener_initially_active: true,
            frame_interval: Duration::from_millis(50),
        }
    }
}

fn millis<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
    u64::deserialize(d).map(Duration::from_millis)
}

const FETCH_DELAY_MS: &str = "SIDEFX_FETCH_DELAY_MS";
const TASK_DURATION_MS: &str = "SIDEFX_TASK_DURATION_MS";
const INITIAL_USER_ID: &str = "SIDEFX_INITIAL_USER_ID";
const LISTENER_ACTIVE: &str = "SIDEFX_LISTENER_ACTIVE";
const FRAME_INTERVAL_MS: &str = "SIDEFX_FRAME_INTERVAL_MS";

impl DemoConfig {
    /// Defaults overlaid with `SIDEFX_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(v) = lookup(FETCH_DELAY_MS) {
            config.fetch_delay = Duration::from_millis(parse(FETCH_DELAY_MS, &v)?);
        }
        if let Some(v) = lookup(TASK_DURATION_MS) {
            config.task_duration = Duration::from_millis(parse(TASK_DURATION_MS, &v)?);
        }
        if let Some(v) = lookup(INITIAL_USER_ID) {
            config.initial_user_id = parse(INITIAL_USER_ID, &v)?;
        }
        if let Some(v) = lookup(LISTENER_ACTIVE) {
            config.listener_initially_active = parse_flag(LISTENER_ACTIVE, &v)?;
        }
        if let Some(v) = lookup(FRAME_INTERVAL_MS) {
            config.frame_interval = Duration::from_millis(parse(FRAME_INTERVAL_MS, &v)?);
        }
        Ok(config)
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_defaults() {
        let config = DemoConfig::from_lookup(|var| match var {
            "SIDEFX_FETCH_DELAY_MS" => Some("250".into()),
            "SIDEFX_LISTENER_ACTIVE" => Some("off".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.fetch_delay, Duration::from_millis(250));
        assert!(!config.listener_initially_active);
        assert_eq!(config.initial_user_id, 101);
        assert_eq!(config.task_duration, Duration::from_millis(3000));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = DemoConfig::from_lookup(|var| {
            (var == "SIDEFX_INITIAL_USER_ID").then(|| "abc".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "SIDEFX_INITIAL_USER_ID",
                ..
            }
        ));
    }

    #[test]
    fn deserializes_millis_with_defaults() {
        let config: DemoConfig =
            serde_json::from_str(r#"{ "fetch_delay": 10, "initial_user_id": 7 }"#).unwrap();
        assert_eq!(config.fetch_delay, Duration::from_millis(10));
        assert_eq!(config.initial_user_id, 7);
        assert_eq!(config.frame_interval, Duration::from_millis(50));
    }
}
