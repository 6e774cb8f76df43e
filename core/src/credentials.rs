//! Credential sanitization and validation.
//!
//! Both values are first stripped of control characters and anything outside
//! printable ASCII. The stripped value is what gets validated and stored.

use std::fmt;

/// Usernames must be strictly shorter than this after sanitization.
pub const MAX_USERNAME_LEN: usize = 60;

/// Which credential failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Username,
    ApiKey,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialField::Username => write!(f, "username"),
            CredentialField::ApiKey => write!(f, "api key"),
        }
    }
}

/// Validated Quorum account credentials. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    api_key: String,
}

impl Credentials {
    /// Sanitize and validate both values. The API key is checked first.
    pub fn new(username: &str, api_key: &str) -> Result<Self, CredentialField> {
        let api_key = strip_unsafe(api_key);
        if !is_valid_api_key(&api_key) {
            return Err(CredentialField::ApiKey);
        }
        let username = strip_unsafe(username);
        if !is_valid_username(&username) {
            return Err(CredentialField::Username);
        }
        Ok(Self { username, api_key })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Query pairs that authenticate a request, username first.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("username".to_string(), self.username.clone()),
            ("api_key".to_string(), self.api_key.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Keep printable ASCII (space through `~`), drop everything else.
pub fn strip_unsafe(input: &str) -> String {
    input.chars().filter(|c| matches!(c, ' '..='~')).collect()
}

pub fn is_valid_api_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty() && username.len() < MAX_USERNAME_LEN
}
