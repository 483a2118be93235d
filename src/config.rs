use std::env;

use spotiskill_server::{ServerConfig, DEFAULT_PORT};
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data.db";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a port number, got \"{value}\"")]
    InvalidPort { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let port = match var("SPOTISKILL_SERVER_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                name: "SPOTISKILL_SERVER_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let database_url =
            var("SPOTISKILL_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let seed = var("SPOTISKILL_SEED")
            .map(|x| matches!(x.as_str(), "1" | "true"))
            .unwrap_or_default();

        Ok(Self {
            port,
            database_url,
            seed,
        })
    }

    pub fn server(&self) -> ServerConfig {
        ServerConfig { port: self.port }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&'static str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<_, _> = vars.iter().map(|(k, v)| (*k, v.to_string())).collect();

        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(
            config,
            Config {
                port: DEFAULT_PORT,
                database_url: DEFAULT_DATABASE_URL.to_string(),
                seed: false,
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SPOTISKILL_SERVER_PORT", "3000"),
            ("SPOTISKILL_DATABASE_URL", "sqlite::memory:"),
            ("SPOTISKILL_SEED", "true"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert!(config.seed);
    }

    #[test]
    fn test_invalid_port() {
        let result = config_from(&[("SPOTISKILL_SERVER_PORT", "eighty")]);

        assert_eq!(
            result,
            Err(ConfigError::InvalidPort {
                name: "SPOTISKILL_SERVER_PORT",
                value: "eighty".to_string(),
            })
        );
    }
}
