//! Request payloads for the Quorum API.
//!
//! `create_supporter` accepts any `Serialize` value, so a raw
//! `serde_json::Map` works just as well as `NewSupporter`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Supporter fields for `POST /supporter/`. Unset fields are omitted from the
/// JSON body; anything not modelled here goes in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewSupporter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewSupporter {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            firstname: Some(firstname.into()),
            lastname: Some(lastname.into()),
            email: Some(email.into()),
            extra: Map::new(),
        }
    }

    /// Add an extra field, replacing any previous value under `key`.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}
