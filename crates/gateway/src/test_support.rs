//! Router test helpers

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};
use tarjuman_common::{
    config::AppConfig,
    db::InMemoryStore,
    translator::MockTranslator,
};
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::{create_router, AppState};

/// Gateway wired to a mock translator and an in-memory store
pub struct TestApp {
    pub translator: Arc<MockTranslator>,
    pub store: Arc<InMemoryStore>,
    state: AppState,
}

impl TestApp {
    /// Echo translator, empty store
    pub fn new() -> Self {
        Self::build(MockTranslator::echo(), InMemoryStore::new())
    }

    pub fn with_translator_reply(reply: &str) -> Self {
        Self::build(MockTranslator::replying(reply), InMemoryStore::new())
    }

    pub fn with_failing_translator() -> Self {
        Self::build(MockTranslator::failing(), InMemoryStore::new())
    }

    /// Echo translator, embedded sample data
    pub fn seeded() -> Self {
        Self::build(MockTranslator::echo(), InMemoryStore::seeded().unwrap())
    }

    pub fn seeded_with_failing_translator() -> Self {
        Self::build(MockTranslator::failing(), InMemoryStore::seeded().unwrap())
    }

    fn build(translator: MockTranslator, store: InMemoryStore) -> Self {
        let translator = Arc::new(translator);
        let store = Arc::new(store);

        let state = AppState {
            config: Arc::new(AppConfig::default()),
            store: store.clone(),
            translator: translator.clone(),
            metrics: None,
        };

        Self {
            translator,
            store,
            state,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }
}

/// Send a request with an optional JSON body; returns status and parsed JSON body
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string()).unwrap_or_default();
    send_raw(app, method, uri, &body).await
}

/// Send a raw body labelled as JSON
pub async fn send_raw(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    dispatch(app, request).await
}

/// Send a raw body with no content type at all
pub async fn send_unlabelled(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    dispatch(app, request).await
}

async fn dispatch(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, json)
}

/// Plain-text log lines collected from the current thread.
///
/// `#[tokio::test]` runs on a single thread, so every event emitted while
/// handling a `oneshot` request lands here.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Install as the thread's default subscriber until the guard drops
    pub fn install() -> (Self, DefaultGuard) {
        let capture = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(capture.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub fn lines(&self) -> Vec<String> {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer)
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines emitted at ERROR level
    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(" ERROR "))
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
