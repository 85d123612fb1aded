//! Per-user client over a [`Transport`].
//!
//! A `Client` owns the session state one user accumulates against the
//! application pipeline: a cookie jar persisted across calls and automatic
//! redirect following. The engine builds one client per registered user;
//! clients are never shared between users.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use crate::{
    error::BoxError,
    transport::{Request, Response, Transport},
};

/// Upper bound on redirect hops followed for a single call.
const MAX_REDIRECTS: usize = 10;

/// Errors produced by the client itself, as opposed to the transport.
#[derive(Debug)]
pub enum ClientError {
    /// The redirect chain exceeded the hop limit.
    TooManyRedirects {
        /// The hop limit that was exceeded.
        limit: usize,
    },
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyRedirects { limit } => {
                write!(f, "redirect chain exceeded {limit} hops")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Handle for sending requests through an in-process pipeline.
pub struct Client {
    transport: Arc<dyn Transport>,
    // Cookie jar keyed by name; BTreeMap keeps the Cookie header stable.
    cookies: Mutex<BTreeMap<String, String>>,
}

impl Client {
    /// Construct a client over `transport` with an empty cookie jar.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cookies: Mutex::new(BTreeMap::new()),
        }
    }

    /// Send `request` through the pipeline, following redirects and
    /// persisting cookies across the exchange.
    ///
    /// # Errors
    ///
    /// Returns the transport's error unchanged, or
    /// [`ClientError::TooManyRedirects`] when the redirect chain exceeds the
    /// hop limit.
    pub async fn send(&self, request: Request) -> Result<Response, BoxError> {
        let mut request = request;
        for _hop in 0..=MAX_REDIRECTS {
            let response = self.transport.handle(self.with_cookies(&request)).await?;
            self.store_cookies(&response);

            if !response.is_redirect() {
                return Ok(response);
            }
            let Some(location) = response.header_value("location") else {
                // A redirect status without a target is returned as-is for
                // the caller to assert on.
                return Ok(response);
            };
            request = redirected(&request, location, response.status);
        }
        Err(ClientError::TooManyRedirects {
            limit: MAX_REDIRECTS,
        }
        .into())
    }

    /// Snapshot of the cookie jar, for assertions in postconditions.
    #[must_use]
    pub fn cookies(&self) -> BTreeMap<String, String> {
        self.cookies.lock().expect("cookie jar poisoned").clone()
    }

    fn with_cookies(&self, request: &Request) -> Request {
        let jar = self.cookies.lock().expect("cookie jar poisoned");
        if jar.is_empty() {
            return request.clone();
        }
        let header = jar
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        request.clone().header("cookie", &header)
    }

    fn store_cookies(&self, response: &Response) {
        let mut jar = self.cookies.lock().expect("cookie jar poisoned");
        for raw in response.header_values("set-cookie") {
            // Only the name=value pair is honoured; attributes such as
            // Path or Expires do not apply inside one scenario run.
            let pair = raw.split(';').next().unwrap_or(raw);
            if let Some((name, value)) = pair.split_once('=') {
                jar.insert(name.trim().to_owned(), value.trim().to_owned());
            }
        }
    }
}

/// Build the follow-up request for a redirect response.
///
/// 303 (and, following common practice, 301/302) replay as `GET` without a
/// body; 307/308 preserve the original method and body. Cookies are attached
/// separately on each hop.
fn redirected(request: &Request, location: &str, status: u16) -> Request {
    match status {
        307 | 308 => {
            let mut next = request.clone();
            next.path = location.to_owned();
            next
        }
        _ => Request::get(location),
    }
}

#[cfg(test)]
mod tests {
    use super::redirected;
    use crate::transport::Request;

    #[test]
    fn see_other_replays_as_get_without_body() {
        let original = Request::post("/submit").body(b"payload".to_vec());
        let next = redirected(&original, "/result", 303);
        assert_eq!(next.method, "GET");
        assert_eq!(next.path, "/result");
        assert!(next.body.is_empty());
    }

    #[test]
    fn temporary_redirect_preserves_method_and_body() {
        let original = Request::post("/submit").body(b"payload".to_vec());
        let next = redirected(&original, "/moved", 307);
        assert_eq!(next.method, "POST");
        assert_eq!(next.path, "/moved");
        assert_eq!(next.body, b"payload");
    }
}
