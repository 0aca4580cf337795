//! Local stand-in for PokeAPI, answering by request path.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, Response, StatusCode};
use axum::routing::any;
use axum::Router;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
}

impl MockResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: r#"{"detail": "Not found."}"#.to_string(),
        }
    }
}

#[derive(Clone)]
struct MockState {
    routes: Arc<Mutex<HashMap<String, MockResponse>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub struct MockPokeApi {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockPokeApi {
    pub async fn start() -> Self {
        let state = MockState {
            routes: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/{*path}", any(handle_request))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    /// Answer `path` (no query string) with `response`. Unknown paths get 404.
    pub async fn route(&self, path: &str, response: MockResponse) {
        self.state
            .routes
            .lock()
            .await
            .insert(path.to_string(), response);
    }

    /// Request targets seen so far, path plus query.
    pub async fn requests(&self) -> Vec<String> {
        self.state.requests.lock().await.clone()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/v2", self.addr)
    }
}

impl Drop for MockPokeApi {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

async fn handle_request(State(state): State<MockState>, req: Request<Body>) -> Response<Body> {
    let path = req.uri().path().to_string();
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| path.clone());
    state.requests.lock().await.push(target);

    let mock = state
        .routes
        .lock()
        .await
        .get(&path)
        .cloned()
        .unwrap_or_else(|| MockResponse::status(404));

    Response::builder()
        .status(StatusCode::from_u16(mock.status).unwrap())
        .header("content-type", "application/json")
        .body(Body::from(mock.body))
        .unwrap()
}
