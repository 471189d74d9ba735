use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use gamehub_client::ApiClient;
use gamehub_client::config::ApiConfig;
use gamehub_core::catalog::Game;
use gamehub_core::test_helpers::games_body;

/// What the mock catalog answers on `/games`.
#[derive(Clone)]
pub enum Behavior {
    Games(Vec<Game>),
    Status(StatusCode, String),
    Raw(String),
    Html(StatusCode, String),
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<HashMap<String, String>>>,
}

/// Mock catalog API bound to an ephemeral local port.
pub struct CatalogServer {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<HashMap<String, String>>>,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl CatalogServer {
    pub async fn start(behavior: Behavior) -> Self {
        Self::with_delay(behavior, Duration::ZERO).await
    }

    pub async fn with_delay(behavior: Behavior, delay: Duration) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let hits = Arc::new(AtomicUsize::new(0));
        let last_query = Arc::new(Mutex::new(HashMap::new()));
        let state = MockState {
            behavior,
            delay,
            hits: Arc::clone(&hits),
            last_query: Arc::clone(&last_query),
        };
        let app = Router::new()
            .route("/api/games", axum::routing::get(games))
            .with_state(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            hits,
            last_query,
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn client(&self) -> ApiClient {
        self.client_with(|_| {})
    }

    pub fn client_with(&self, tweak: impl FnOnce(&mut ApiConfig)) -> ApiClient {
        let mut config = ApiConfig {
            base_url: self.base_url(),
            ..ApiConfig::default()
        };
        tweak(&mut config);
        ApiClient::new(&config).unwrap()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.last_query.lock().unwrap().clone()
    }
}

async fn games(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = params;

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    match state.behavior {
        Behavior::Games(list) => axum::Json(games_body(&list)).into_response(),
        Behavior::Status(status, body) => (status, body).into_response(),
        Behavior::Raw(body) => (
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Behavior::Html(status, page) => (
            status,
            [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
            page,
        )
            .into_response(),
    }
}
