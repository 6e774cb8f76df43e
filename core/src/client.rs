//! Blocking client for the Quorum Public Affairs API.
//!
//! # Design
//! `QuorumClient` holds validated credentials, a base URL and a transport.
//! Every operation is split in two: a `build_*` method that produces the
//! authenticated `HttpRequest` as plain data, and a dispatching method that
//! hands it to the transport and returns the `HttpResponse` untouched.
//!
//! Status codes are never interpreted here. A 401 from the API is returned
//! as a response with status 401; only failures below HTTP become
//! `ApiError::Transport`.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Base URL that endpoint paths are appended to.
pub const API_BASE_URL: &str = "https://www.quorum.us/api";

pub const LIST_PATH: &str = "/list/";
pub const CUSTOM_TAG_PATH: &str = "/customtag/";
pub const SUPPORTER_PATH: &str = "/supporter/";

/// Synchronous client for the Quorum API.
///
/// Each call performs exactly one request on the calling thread. The client
/// adds no locking of its own, so it is `Sync` exactly when `T` is.
#[derive(Debug, Clone)]
pub struct QuorumClient<T = UreqTransport> {
    credentials: Credentials,
    base_url: String,
    transport: T,
}

impl QuorumClient<UreqTransport> {
    /// Build a client on the default ureq transport.
    pub fn new(username: &str, api_key: &str) -> Result<Self, ApiError> {
        Self::with_transport(username, api_key, UreqTransport::new())
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Ok(Self::new(&config.username, &config.api_key)?.with_base_url(&config.base_url))
    }
}

impl<T: Transport> QuorumClient<T> {
    /// Sanitize and validate the credentials, then wrap `transport`.
    pub fn with_transport(username: &str, api_key: &str, transport: T) -> Result<Self, ApiError> {
        let credentials =
            Credentials::new(username, api_key).map_err(ApiError::CredentialsInvalid)?;
        Ok(Self {
            credentials,
            base_url: API_BASE_URL.to_string(),
            transport,
        })
    }

    /// Point the client somewhere other than `API_BASE_URL`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_get_lists(&self) -> HttpRequest {
        self.request(HttpMethod::Get, LIST_PATH, None)
    }

    pub fn build_get_custom_tags(&self) -> HttpRequest {
        self.request(HttpMethod::Get, CUSTOM_TAG_PATH, None)
    }

    pub fn build_create_supporter<S>(&self, data: &S) -> Result<HttpRequest, ApiError>
    where
        S: Serialize + ?Sized,
    {
        let body =
            serde_json::to_string(data).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, SUPPORTER_PATH, Some(body)))
    }

    /// `GET /list/`.
    pub fn get_lists(&self) -> Result<HttpResponse, ApiError> {
        self.dispatch(self.build_get_lists())
    }

    /// `GET /customtag/`.
    pub fn get_custom_tags(&self) -> Result<HttpResponse, ApiError> {
        self.dispatch(self.build_get_custom_tags())
    }

    /// `POST /supporter/` with `data` as the JSON body.
    pub fn create_supporter<S>(&self, data: &S) -> Result<HttpResponse, ApiError>
    where
        S: Serialize + ?Sized,
    {
        self.dispatch(self.build_create_supporter(data)?)
    }

    /// Probe the API with `get_lists`. True only for a 200 response; every
    /// error is swallowed and reported as false.
    pub fn validate(&self) -> bool {
        match self.get_lists() {
            Ok(response) if response.status == 200 => true,
            Ok(response) => {
                warn!(status = response.status, "validation request was not accepted");
                false
            }
            Err(e) => {
                warn!(error = %e, "validation request failed");
                false
            }
        }
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query: self.credentials.query_pairs(),
            headers,
            body,
        }
    }

    fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            username = self.credentials.username(),
            "sending request"
        );
        let response = self.transport.perform(&request)?;
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            status = response.status,
            "received response"
        );
        Ok(response)
    }
}
