//! In-process fake GraphQL endpoint for integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request the fake endpoint received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct FakeState {
    responses: Mutex<VecDeque<(StatusCode, String)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Serves `POST /graphql` with scripted responses.
///
/// Responses are returned in order; the last one repeats once the script is
/// down to a single entry.
pub struct FakeEndpoint {
    pub url: String,
    state: Arc<FakeState>,
    handle: JoinHandle<()>,
}

impl FakeEndpoint {
    pub async fn start() -> Self {
        let state = Arc::new(FakeState::default());
        let app = Router::new()
            .route("/graphql", post(graphql))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake endpoint");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/graphql", addr),
            state,
            handle,
        }
    }

    pub fn respond(&self, status: StatusCode, body: impl Into<String>) {
        self.state
            .responses
            .lock()
            .unwrap()
            .push_back((status, body.into()));
    }

    pub fn respond_json(&self, body: serde_json::Value) {
        self.respond(StatusCode::OK, body.to_string());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeEndpoint {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn graphql(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(RecordedRequest {
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string()),
        body,
    });

    let mut responses = state.responses.lock().unwrap();
    if responses.len() > 1 {
        responses.pop_front().unwrap()
    } else {
        responses.front().cloned().unwrap_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "no response scripted".to_string(),
        ))
    }
}
