//! Synchronous client for the Quorum Public Affairs API.
//!
//! # Overview
//! Validates an account's username and API key, builds authenticated requests
//! for the list, custom tag and supporter endpoints, and returns the raw HTTP
//! response for the caller to inspect.
//!
//! # Design
//! - Credentials travel as `username` and `api_key` query parameters.
//! - Requests are built as plain data (`build_*`) and dispatched through a
//!   `Transport`, so tests swap in `MockTransport` instead of the network.
//! - Any HTTP status is a successful return. Only failures below HTTP are
//!   errors.
//! - No retries, pagination or response schema checks.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{QuorumClient, API_BASE_URL};
pub use config::Config;
pub use credentials::{CredentialField, Credentials};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{MockTransport, Transport, UreqTransport};
pub use types::NewSupporter;
