//! Pluggable HTTP transports.
//!
//! # Design
//! `QuorumClient` never talks to the network directly; it hands each
//! `HttpRequest` to a `Transport`. `UreqTransport` is the default and is
//! configured so that every HTTP status, 4xx included, is returned as a
//! response rather than an error. `MockTransport` replays canned results and
//! records what it was asked to send, which is how tests substitute the
//! network without touching the client.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

use ureq::RequestBuilder;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Issues a single HTTP request and returns its response.
///
/// Implementations must return `Ok` for every response the server sent,
/// whatever its status. `Err` is reserved for failures below HTTP.
pub trait Transport {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).perform(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).perform(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Copy query pairs and headers onto a ureq request of either body type.
    fn prepare<B>(&self, builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
        let query = request
            .query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()));
        request
            .headers
            .iter()
            .fold(builder.query_pairs(query), |builder, (name, value)| {
                builder.header(name.as_str(), value.as_str())
            })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let result = match (request.method, &request.body) {
            (HttpMethod::Get, _) => self.prepare(self.agent.get(url), request).call(),
            (HttpMethod::Post, Some(body)) => {
                self.prepare(self.agent.post(url), request).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => self.prepare(self.agent.post(url), request).send_empty(),
        };
        let mut response = result.map_err(TransportError::from_source)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // No size cap: the caller gets the body exactly as sent.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(TransportError::from_source)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// In-memory transport that replays queued results in order.
///
/// Every request passed to `perform` is recorded and can be inspected with
/// `requests()`. Performing with an empty queue is a `TransportError`.
#[derive(Debug, Default)]
pub struct MockTransport {
    queue: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    seen: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that answers once with `status` and `body`.
    pub fn with_response(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let transport = Self::new();
        transport.push_response(status, body);
        transport
    }

    /// A transport that fails once below HTTP.
    pub fn with_error(message: impl Into<String>) -> Self {
        let transport = Self::new();
        transport.push_error(message);
        transport
    }

    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.push(Ok(HttpResponse::new(status, body)));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.push(Err(TransportError::new(message)));
    }

    pub fn push(&self, result: Result<HttpResponse, TransportError>) {
        lock(&self.queue).push_back(result);
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.seen).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.seen).last().cloned()
    }
}

impl Transport for MockTransport {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        lock(&self.seen).push(request.clone());
        lock(&self.queue).pop_front().unwrap_or_else(|| {
            Err(TransportError::new(format!(
                "mock transport has no response queued for {} {}",
                request.method.as_str(),
                request.url
            )))
        })
    }
}

// A poisoned lock only means another test thread panicked mid-push; the data
// is still usable.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
