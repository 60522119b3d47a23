//! Stub of the REST Countries API served by axum
//!
//! Serves canned JSON bodies keyed by request path and records every path it
//! is asked for. Unknown paths answer 404 the way the real API does.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Path prefix the stub mounts the API under
pub const API_PREFIX: &str = "/v3.1";

type Hits = Arc<Mutex<Vec<String>>>;

/// Builder for a stub server's routes
#[derive(Debug, Default)]
pub struct StubApi {
    routes: Vec<(String, StatusCode, String)>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `GET /v3.1{path}` with status 200 and `body`
    pub fn json(self, path: &str, body: Value) -> Self {
        self.reply(path, 200, body.to_string())
    }

    /// Answers `GET /v3.1{path}` with an arbitrary status and raw body
    pub fn reply(mut self, path: &str, status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).expect("Invalid status code");
        self.routes
            .push((format!("{}{}", API_PREFIX, path), status, body.into()));
        self
    }

    /// Binds to an ephemeral port and starts serving in the background
    pub async fn start(self) -> StubServer {
        let hits: Hits = Arc::new(Mutex::new(Vec::new()));

        let mut router = Router::new();
        for (path, status, body) in self.routes {
            router = router.route(
                &path,
                get(move || async move {
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }),
            );
        }
        let router = router
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(Arc::clone(&hits), record_path));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Stub server has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        StubServer {
            base_url: format!("http://{}{}", addr, API_PREFIX),
            hits,
        }
    }
}

/// Handle to a running stub server
pub struct StubServer {
    pub base_url: String,
    hits: Hits,
}

impl StubServer {
    /// Paths requested so far, in arrival order
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

async fn record_path(State(hits): State<Hits>, request: Request, next: Next) -> Response {
    hits.lock().unwrap().push(request.uri().path().to_string());
    next.run(request).await
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": 404, "message": "Not Found" })),
    )
}

pub fn france() -> Value {
    json!({
        "name": { "common": "France", "official": "French Republic" },
        "capital": ["Paris"],
        "region": "Europe",
        "cca2": "FR",
        "cca3": "FRA",
        "population": 67391582,
        "flag": "🇫🇷"
    })
}

pub fn peru() -> Value {
    json!({
        "name": { "common": "Peru", "official": "Republic of Peru" },
        "capital": ["Lima"],
        "region": "Americas",
        "cca2": "PE",
        "cca3": "PER",
        "population": 32971846,
        "flag": "🇵🇪"
    })
}

pub fn fiji() -> Value {
    json!({
        "name": { "common": "Fiji", "official": "Republic of Fiji" },
        "capital": ["Suva"],
        "region": "Oceania",
        "cca2": "FJ",
        "cca3": "FJI",
        "population": 896444,
        "flag": "🇫🇯"
    })
}
