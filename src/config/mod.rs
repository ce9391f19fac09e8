//! Runtime settings read from the environment (after `.env` is loaded).

use crate::error::ConfigError;
use std::str::FromStr;

const DEFAULT_SECRET_KEY: &str = "secret-dev";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "postgresql:///jobly";
const DEFAULT_TEST_DATABASE_URL: &str = "postgresql:///jobly_test";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HMAC secret for signing and verifying bearer tokens.
    pub secret_key: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            secret_key: DEFAULT_SECRET_KEY.into(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl AppConfig {
    /// Read settings from process env. `JOBLY_ENV=test` switches to `DATABASE_URL_TEST`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_test = lookup("JOBLY_ENV").map(|e| e == "test").unwrap_or(false);
        let database_url = if is_test {
            lookup("DATABASE_URL_TEST").unwrap_or_else(|| DEFAULT_TEST_DATABASE_URL.into())
        } else {
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into())
        };
        Ok(AppConfig {
            secret_key: lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.into()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database_url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            body_limit_bytes: parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
