//! Transport collaborator: the in-process application pipeline.
//!
//! A [`Transport`] answers one request with one response. The engine never
//! constructs requests itself; it wraps the transport in a
//! [`crate::client::Client`] handed to each registered user. When no
//! transport is supplied, [`NotFoundTransport`] answers every request with
//! status 404 so a misconfigured scenario fails fast with an obvious
//! diagnostic.

use async_trait::async_trait;

use crate::error::BoxError;

/// A request travelling into the application pipeline.
///
/// Deliberately minimal: method, path, headers, and body are enough for
/// collaborators to express request/response exchanges without prescribing
/// an HTTP library.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// Request method, e.g. `GET` or `POST`.
    pub method: String,
    /// Request path, including any query string.
    pub path: String,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Request body bytes.
    pub body: Vec<u8>,
}

impl Request {
    /// Construct a request with the given method and path.
    #[must_use]
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_owned(),
            path: path.to_owned(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Construct a `GET` request for `path`.
    #[must_use]
    pub fn get(path: &str) -> Self { Self::new("GET", path) }

    /// Construct a `POST` request for `path`.
    #[must_use]
    pub fn post(path: &str) -> Self { Self::new("POST", path) }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// First header value matching `name`, case-insensitively.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response travelling out of the application pipeline.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Status code, e.g. `200` or `404`.
    pub status: u16,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// Construct a response with the given status and no headers or body.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// First header value matching `name`, case-insensitively.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All header values matching `name`, case-insensitively.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether this status directs the client to another location.
    #[must_use]
    pub fn is_redirect(&self) -> bool { matches!(self.status, 301 | 302 | 303 | 307 | 308) }
}

/// An in-process application pipeline consumed by the engine.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request through the pipeline and await its response.
    async fn handle(&self, request: Request) -> Result<Response, BoxError>;
}

/// Fallback pipeline installed when no transport is supplied.
///
/// Answers every request with status 404. This exists purely so a scenario
/// wired without a transport fails with a recognisable response instead of
/// hanging or panicking.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotFoundTransport;

#[async_trait]
impl Transport for NotFoundTransport {
    async fn handle(&self, _request: Request) -> Result<Response, BoxError> {
        Ok(Response::with_status(404))
    }
}
