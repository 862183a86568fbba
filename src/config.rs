use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid { key: &'static str, value: String, reason: String },
}

/// Per-binary fallbacks used when the environment is silent.
#[derive(Debug, Clone, Copy)]
pub struct Defaults {
    pub port: u16,
    pub index_html: &'static str,
}

/// `host` is handed to the resolver as is, so an IP literal or a name such
/// as `localhost` both work.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub index_html_path: PathBuf,
    pub request_log_path: Option<PathBuf>,
}

impl Config {
    pub fn load(defaults: Defaults) -> Result<Self, ConfigError> {

        dotenvy::dotenv().ok();

        Self::from_lookup(defaults, |key| env::var(key).ok())

    }

    pub fn from_lookup<F>(defaults: Defaults, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {

        Ok(Self {
            host: try_load(&lookup, "HOST", "0.0.0.0".to_string())?,
            port: try_load(&lookup, "PORT", defaults.port)?,
            index_html_path: try_load(&lookup, "INDEX_HTML_PATH", PathBuf::from(defaults.index_html))?,
            request_log_path: lookup("REQUEST_LOG_PATH")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })

    }
}

fn try_load<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{

    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default:?}");
        return Ok(default);
    };

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })

}

#[cfg(test)]
mod tests {

    use std::collections::HashMap;

    use super::*;

    const DEFAULTS: Defaults = Defaults {
        port: 8000,
        index_html: "static/coffee_shop.html",
    };

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {

        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        Config::from_lookup(DEFAULTS, |key| vars.get(key).cloned())

    }

    #[test]
    fn test_defaults_apply_when_unset() {

        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.index_html_path, PathBuf::from("static/coffee_shop.html"));
        assert!(config.request_log_path.is_none());

    }

    #[test]
    fn test_environment_overrides_defaults() {

        let config = config_from(&[
            ("HOST", "localhost"),
            ("PORT", " 9100 "),
            ("REQUEST_LOG_PATH", "/tmp/requests.log"),
        ])
        .unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9100);
        assert_eq!(config.request_log_path, Some(PathBuf::from("/tmp/requests.log")));

    }

    #[test]
    fn test_invalid_port_is_rejected() {

        let error = config_from(&[("PORT", "coffee")]).unwrap_err();

        assert!(matches!(error, ConfigError::Invalid { key: "PORT", .. }));

    }

    #[test]
    fn test_blank_ledger_path_disables_ledger() {

        let config = config_from(&[("REQUEST_LOG_PATH", "  ")]).unwrap();

        assert!(config.request_log_path.is_none());

    }

}
