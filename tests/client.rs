//! Tests for the per-user client: redirects, cookies, and the fail-fast
//! default transport.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use scenarist::{BoxError, Client, NotFoundTransport, Request, Response, Transport};

/// Transport delegating to a closure, recording every request it sees.
struct ScriptedTransport<F> {
    handler: F,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl<F> ScriptedTransport<F>
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    fn new(handler: F) -> Self {
        Self {
            handler,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn requests(&self) -> Arc<Mutex<Vec<Request>>> { Arc::clone(&self.requests) }
}

#[async_trait]
impl<F> Transport for ScriptedTransport<F>
where
    F: Fn(&Request) -> Response + Send + Sync,
{
    async fn handle(&self, request: Request) -> Result<Response, BoxError> {
        let response = (self.handler)(&request);
        self.requests.lock().expect("request log poisoned").push(request);
        Ok(response)
    }
}

#[tokio::test]
async fn default_transport_answers_404() {
    let client = Client::new(Arc::new(NotFoundTransport));
    let response = client.send(Request::get("/missing")).await.expect("no error");
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn cookies_persist_across_calls() {
    let transport = ScriptedTransport::new(|request: &Request| match request.path.as_str() {
        "/login" => Response::with_status(200).header("set-cookie", "session=abc123; Path=/"),
        _ => Response::with_status(200),
    });
    let requests = transport.requests();
    let client = Client::new(Arc::new(transport));

    client.send(Request::post("/login")).await.expect("login");
    client.send(Request::get("/profile")).await.expect("profile");

    let seen = requests.lock().expect("request log poisoned");
    assert_eq!(seen[0].header_value("cookie"), None);
    assert_eq!(seen[1].header_value("cookie"), Some("session=abc123"));
    assert_eq!(client.cookies().get("session").map(String::as_str), Some("abc123"));
}

#[tokio::test]
async fn found_redirect_is_followed_as_get() {
    let transport = ScriptedTransport::new(|request: &Request| match request.path.as_str() {
        "/start" => Response::with_status(302).header("location", "/end"),
        "/end" => Response::with_status(200).body(b"done".to_vec()),
        _ => Response::with_status(404),
    });
    let requests = transport.requests();
    let client = Client::new(Arc::new(transport));

    let response = client
        .send(Request::post("/start").body(b"payload".to_vec()))
        .await
        .expect("redirect followed");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"done");

    let seen = requests.lock().expect("request log poisoned");
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].method, "GET");
    assert_eq!(seen[1].path, "/end");
    assert!(seen[1].body.is_empty(), "replayed GET drops the body");
}

#[tokio::test]
async fn temporary_redirect_preserves_method_and_body() {
    let transport = ScriptedTransport::new(|request: &Request| match request.path.as_str() {
        "/submit" => Response::with_status(307).header("location", "/submit-v2"),
        "/submit-v2" => Response::with_status(201),
        _ => Response::with_status(404),
    });
    let requests = transport.requests();
    let client = Client::new(Arc::new(transport));

    let response = client
        .send(Request::post("/submit").body(b"payload".to_vec()))
        .await
        .expect("redirect followed");
    assert_eq!(response.status, 201);

    let seen = requests.lock().expect("request log poisoned");
    assert_eq!(seen[1].method, "POST");
    assert_eq!(seen[1].path, "/submit-v2");
    assert_eq!(seen[1].body, b"payload");
}

#[tokio::test]
async fn cookies_set_during_redirects_are_kept() {
    let transport = ScriptedTransport::new(|request: &Request| match request.path.as_str() {
        "/login" => Response::with_status(302)
            .header("set-cookie", "session=tok")
            .header("location", "/home"),
        _ => Response::with_status(200),
    });
    let requests = transport.requests();
    let client = Client::new(Arc::new(transport));

    client.send(Request::post("/login")).await.expect("login");

    let seen = requests.lock().expect("request log poisoned");
    assert_eq!(seen[1].path, "/home");
    assert_eq!(seen[1].header_value("cookie"), Some("session=tok"));
}

#[tokio::test]
async fn redirect_without_location_is_returned_as_is() {
    let transport =
        ScriptedTransport::new(|_request: &Request| Response::with_status(302));
    let client = Client::new(Arc::new(transport));

    let response = client.send(Request::get("/loop")).await.expect("no error");
    assert_eq!(response.status, 302);
}

#[tokio::test]
async fn redirect_loops_are_bounded() {
    let transport = ScriptedTransport::new(|_request: &Request| {
        Response::with_status(302).header("location", "/loop")
    });
    let client = Client::new(Arc::new(transport));

    let error = client
        .send(Request::get("/loop"))
        .await
        .expect_err("loop must be cut off");
    assert!(error.to_string().contains("redirect chain exceeded"));
}
