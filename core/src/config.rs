//! Client configuration loaded from the environment.

use std::env;
use std::fmt;

use dotenv::dotenv;
use tracing::debug;

use crate::client::API_BASE_URL;
use crate::error::ApiError;

pub const USERNAME_VAR: &str = "QUORUM_USERNAME";
pub const API_KEY_VAR: &str = "QUORUM_API_KEY";
pub const BASE_URL_VAR: &str = "QUORUM_BASE_URL";

/// Raw settings for building a `QuorumClient`. Credentials are validated when
/// the client is built, not here.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub username: String,
    pub api_key: String,
    pub base_url: String,
}

impl Config {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Read `QUORUM_USERNAME`, `QUORUM_API_KEY` and the optional
    /// `QUORUM_BASE_URL`, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ApiError> {
        if dotenv().is_ok() {
            debug!("loaded .env file");
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let username = get(USERNAME_VAR).ok_or(ApiError::MissingConfig(USERNAME_VAR))?;
        let api_key = get(API_KEY_VAR).ok_or(ApiError::MissingConfig(API_KEY_VAR))?;
        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| API_BASE_URL.to_string());

        Ok(Self {
            username,
            api_key,
            base_url,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_credentials_and_defaults_base_url() {
        let config =
            Config::from_lookup(lookup(&[(USERNAME_VAR, "someone"), (API_KEY_VAR, "abc123")]))
                .unwrap();
        assert_eq!(config, Config::new("someone", "abc123"));
        assert_eq!(config.base_url, API_BASE_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let config = Config::from_lookup(lookup(&[
            (USERNAME_VAR, "someone"),
            (API_KEY_VAR, "abc123"),
            (BASE_URL_VAR, "http://127.0.0.1:3000/api"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:3000/api");
    }

    #[test]
    fn missing_username_is_reported() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "abc123")])).unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig(USERNAME_VAR)));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[(USERNAME_VAR, "someone"), (API_KEY_VAR, "")]))
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig(API_KEY_VAR)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let rendered = format!("{:?}", Config::new("someone", "supersecret42"));
        assert!(!rendered.contains("supersecret42"));
    }
}
