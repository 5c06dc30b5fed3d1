//! Shared helpers for integration tests.
//!
//! Provides a mock search backend that counts calls, a router builder, and a
//! local HTTP server that stands in for the Custom Search API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;

use image_search_proxy::error::SearchError;
use image_search_proxy::search::{
    extract_domain, AllowList, GoogleImageSearch, ImageSearch, QuerySelector, SearchResult,
    SeededRandom,
};
use image_search_proxy::server::{create_router, AppState, RouterConfig};

/// Bearer secret used by test routers.
pub const TEST_SECRET: &str = "test-api-key";

// =============================================================================
// Mock Search Backend
// =============================================================================

/// What the mock backend answers with.
#[derive(Clone)]
enum MockOutcome {
    Image {
        display_link: String,
        title: String,
        thumbnail: String,
    },
    Error(SearchError),
}

/// Search backend that returns a canned outcome and records every call.
#[derive(Clone)]
pub struct MockImageSearch {
    outcome: MockOutcome,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockImageSearch {
    /// Answer every search with one image from `display_link`.
    pub fn with_image(display_link: impl Into<String>) -> Self {
        Self::new(MockOutcome::Image {
            display_link: display_link.into(),
            title: "Test image".to_string(),
            thumbnail: "https://thumbs.example/t.jpg".to_string(),
        })
    }

    /// Answer with an image that has no title and no thumbnail.
    pub fn with_bare_image(display_link: impl Into<String>) -> Self {
        Self::new(MockOutcome::Image {
            display_link: display_link.into(),
            title: String::new(),
            thumbnail: String::new(),
        })
    }

    /// Fail every search with `error`.
    pub fn failing(error: SearchError) -> Self {
        Self::new(MockOutcome::Error(error))
    }

    fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle on the call counter that survives moving the mock into a router.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    /// Handle on the recorded queries.
    pub fn recorded_queries(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.queries)
    }
}

#[async_trait]
impl ImageSearch for MockImageSearch {
    async fn search(&self, query: &str) -> Result<SearchResult, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_string());

        match &self.outcome {
            MockOutcome::Image {
                display_link,
                title,
                thumbnail,
            } => Ok(SearchResult {
                query: query.to_string(),
                image_url: format!("https://{}/image.jpg", display_link),
                title: title.clone(),
                thumbnail: thumbnail.clone(),
                source: extract_domain(display_link).to_string(),
            }),
            MockOutcome::Error(err) => Err(err.clone()),
        }
    }
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Router with the default allow-list, the test secret, and tracing off.
pub fn test_router(search: MockImageSearch) -> Router {
    test_router_with(search, RouterConfig::new(TEST_SECRET))
}

/// Router with a custom router configuration.
pub fn test_router_with(search: MockImageSearch, config: RouterConfig) -> Router {
    let selector = QuerySelector::new(Arc::new(SeededRandom::with_seed(1)));
    let state = AppState::new(search, selector, AllowList::default());
    create_router(state, config.with_tracing(false))
}

/// Router whose state has no search backend (missing provider credentials).
pub fn router_without_credentials() -> Router {
    let selector = QuerySelector::new(Arc::new(SeededRandom::with_seed(1)));
    let state = AppState::<MockImageSearch>::without_searcher(selector, AllowList::default());
    create_router(state, RouterConfig::new(TEST_SECRET).with_tracing(false))
}

/// Router backed by the real Custom Search client pointed at `search_url`.
pub fn provider_router(search_url: &str) -> Router {
    let search = GoogleImageSearch::with_options(
        "google-key",
        "engine-id",
        AllowList::default(),
        search_url,
        Duration::from_secs(5),
    )
    .unwrap();
    let selector = QuerySelector::new(Arc::new(SeededRandom::with_seed(1)));
    let state = AppState::new(search, selector, AllowList::default());
    create_router(state, RouterConfig::new(TEST_SECRET).with_tracing(false))
}

/// GET `uri` with an optional Authorization header.
pub fn get_request(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

/// GET `/api/image` with the valid test token.
pub fn authorized_image_request() -> Request<Body> {
    get_request("/api/image", Some(&format!("Bearer {}", TEST_SECRET)))
}

/// Collect a response body into a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =============================================================================
// Stand-in Provider
// =============================================================================

/// Canned provider behavior.
#[derive(Clone)]
pub struct ProviderReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl ProviderReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Query strings received by the stand-in provider.
pub type CapturedQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct ProviderState {
    reply: ProviderReply,
    captured: CapturedQueries,
}

async fn provider_handler(
    State(state): State<ProviderState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.captured.lock().unwrap().push(params);
    if !state.reply.delay.is_zero() {
        tokio::time::sleep(state.reply.delay).await;
    }
    (
        state.reply.status,
        [("content-type", "application/json")],
        state.reply.body,
    )
}

/// Start a local provider on an ephemeral port.
///
/// Returns the endpoint URL and the captured query parameters.
pub async fn spawn_provider(reply: ProviderReply) -> (String, CapturedQueries) {
    let captured: CapturedQueries = Arc::new(Mutex::new(Vec::new()));
    let state = ProviderState {
        reply,
        captured: Arc::clone(&captured),
    };

    let app = Router::new()
        .route("/customsearch/v1", get(provider_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/customsearch/v1", addr), captured)
}

/// A provider response body with a single item.
pub fn single_item_body(link: &str, display_link: &str) -> String {
    serde_json::json!({
        "kind": "customsearch#search",
        "items": [{
            "title": "Neon city at night",
            "link": link,
            "displayLink": display_link,
            "image": {
                "contextLink": format!("https://{}/page", display_link),
                "height": 1080,
                "width": 1920,
                "byteSize": 123456,
                "thumbnailLink": "https://encrypted-tbn0.gstatic.com/images?q=tbn:abc",
                "thumbnailHeight": 84,
                "thumbnailWidth": 150
            }
        }]
    })
    .to_string()
}

/// Start a raw TCP provider that answers with `status` and a body cut short.
///
/// The response announces more bytes than it sends and then closes, so
/// reading the body fails.
pub async fn spawn_truncated_provider(status: u16) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let head = format!(
            "HTTP/1.1 {} Error\r\ncontent-type: application/json\r\ncontent-length: 1000\r\n\r\n{{\"err",
            status
        );
        let _ = socket.write_all(head.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}/customsearch/v1", addr)
}
