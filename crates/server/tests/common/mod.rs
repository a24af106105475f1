//! Server test utilities.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use satchel_core::{AppConfig, AuthConfig, WordCorpus};
use satchel_server::{create_router, AppState};
use satchel_store::FolderStore;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with temporary storage, known secrets, and
    /// no auth-failure delay.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("failed to create temp directory");

        let mut config = AppConfig {
            auth: AuthConfig::for_testing(),
            ..Default::default()
        };
        config.folders.root = temp_dir.path().join("folders");
        modifier(&mut config);
        config.validate().expect("invalid test configuration");

        let corpus = WordCorpus::builtin(config.folders.word_min_len, config.folders.word_max_len)
            .expect("failed to load builtin corpus");
        let store = Arc::new(
            FolderStore::new(config.folders.clone())
                .await
                .expect("failed to open folder store"),
        );

        let state = AppState::new(config, store, Arc::new(corpus));
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// The storage root backing this server.
    pub fn root(&self) -> PathBuf {
        self.state.store.root().to_path_buf()
    }

    /// Send a request and return status, headers, and raw body bytes.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        auth: Option<&str>,
        user_agent: Option<&str>,
    ) -> (StatusCode, HeaderMap, Bytes) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        if let Some(value) = user_agent {
            builder = builder.header("User-Agent", value);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body)
    }

    /// Send a request and parse the body as JSON.
    pub async fn json(&self, method: &str, uri: &str, auth: Option<&str>) -> (StatusCode, Value) {
        let (status, _, body) = self.send(method, uri, auth, None).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Create a folder through the API and return its identifier.
    pub async fn create_folder(&self) -> String {
        let (status, headers, _) = self
            .send("POST", "/folder", Some("Bearer s2cr2t"), Some("test-agent"))
            .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = headers["location"].to_str().unwrap();
        location.rsplit('/').next().unwrap().to_string()
    }
}
