//! Test utilities.
//!
//! [`RecordingClient`] stands in for the HTTP client in unit tests.
//! [`FakeSuperset`] (behind the `testutil` feature) is a real HTTP server on
//! an ephemeral port for end-to-end tests of [`crate::client::SupersetClient`].

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::client::{ClientRequest, ClientResponse, HttpClient, ParseMethod, TransportError};

/// Records every request and answers each one with the same outcome.
pub struct RecordingClient {
    requests: Mutex<Vec<ClientRequest>>,
    outcome: Result<ClientResponse, TransportError>,
}

impl RecordingClient {
    pub fn responding(json: Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: Ok(json_response(200, &json)),
        }
    }

    pub fn with_response(response: ClientResponse) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: Ok(response),
        }
    }

    pub fn failing(err: TransportError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: Err(err),
        }
    }

    pub fn requests(&self) -> Vec<ClientRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ClientRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for RecordingClient {
    fn default() -> Self {
        Self::responding(Value::Object(Default::default()))
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn request(&self, request: ClientRequest) -> Result<ClientResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

pub fn json_response(status: u16, json: &Value) -> ClientResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    ClientResponse::decode(
        status,
        "OK".to_string(),
        headers,
        Bytes::from(json.to_string()),
        ParseMethod::Json,
    )
    .unwrap()
}

#[cfg(feature = "testutil")]
pub use fake::{FakeSuperset, ReceivedRequest};

#[cfg(feature = "testutil")]
mod fake {
    use std::collections::BTreeMap;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::body::{Body, Bytes};
    use axum::extract::{Form, FromRequest, State};
    use axum::http::{HeaderMap, Method, Request, StatusCode, Uri, header};
    use axum::response::{IntoResponse, Response};
    use axum::Router;
    use serde_json::Value;
    use tokio::task::JoinHandle;

    #[derive(Debug, Clone)]
    pub struct ReceivedRequest {
        pub method: Method,
        pub path: String,
        pub headers: HeaderMap,
        pub body: Bytes,
        /// Decoded body for `application/x-www-form-urlencoded` requests.
        pub form: Option<BTreeMap<String, String>>,
    }

    impl ReceivedRequest {
        pub fn json(&self) -> Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    struct FakeState {
        status: StatusCode,
        body: String,
        received: Mutex<Vec<ReceivedRequest>>,
    }

    /// Answers every route with a fixed status and body.
    pub struct FakeSuperset {
        addr: SocketAddr,
        state: Arc<FakeState>,
        task: JoinHandle<()>,
    }

    impl FakeSuperset {
        pub async fn start(status: u16, body: Value) -> Self {
            Self::start_raw(status, body.to_string()).await
        }

        pub async fn start_raw(status: u16, body: impl Into<String>) -> Self {
            let state = Arc::new(FakeState {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.into(),
                received: Mutex::new(Vec::new()),
            });
            let router = Router::new().fallback(record).with_state(state.clone());
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let task = tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            Self { addr, state, task }
        }

        pub fn base_url(&self) -> String {
            format!("http://{}", self.addr)
        }

        pub fn received(&self) -> Vec<ReceivedRequest> {
            self.state.received.lock().unwrap().clone()
        }
    }

    impl Drop for FakeSuperset {
        fn drop(&mut self) {
            self.task.abort();
        }
    }

    async fn record(
        State(state): State<Arc<FakeState>>,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let is_form = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"));
        let form = if is_form {
            let request = Request::builder()
                .method(method.clone())
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.clone()))
                .unwrap();
            Form::<BTreeMap<String, String>>::from_request(request, &())
                .await
                .ok()
                .map(|Form(fields)| fields)
        } else {
            None
        };

        state.received.lock().unwrap().push(ReceivedRequest {
            method,
            path: uri.path().to_string(),
            headers,
            body,
            form,
        });

        (
            state.status,
            [(header::CONTENT_TYPE, "application/json")],
            state.body.clone(),
        )
            .into_response()
    }
}
