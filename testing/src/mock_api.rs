//! Mock recipe server for HTTP client tests
//!
//! Serves a directory of static JSON fixtures over HTTP on a random local
//! port. A request for a directory serves the `index.json` inside it, which
//! mirrors how the real server answers `/api/v1/` style URLs.
//!
//! # Example
//!
//! ```ignore
//! let server = MockApiServer::start("tests/mock_api").await?;
//! let api = NormandyApi::new(ApiConfig::new(server.api_url("/api/v1")));
//! let recipes = api.fetch_recipes().await?;
//! server.stop().await;
//! ```

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct FixtureRoot {
    root: PathBuf,
    requests: Mutex<Vec<String>>,
}

impl FixtureRoot {
    fn record(&self, path: &str) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

/// An HTTP server answering requests from a fixture directory
///
/// The server shuts down when [`MockApiServer::stop`] is awaited or when the
/// value is dropped.
pub struct MockApiServer {
    addr: SocketAddr,
    fixtures: Arc<FixtureRoot>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MockApiServer {
    /// Bind `127.0.0.1` on a free port and start serving `root`
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let fixtures = Arc::new(FixtureRoot {
            root: root.into(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(serve_fixture)
            .with_state(Arc::clone(&fixtures));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(error) = server.await {
                tracing::error!(%error, "mock API server failed");
            }
        });

        tracing::debug!(%addr, root = %fixtures.root.display(), "mock API server started");

        Ok(Self {
            addr,
            fixtures,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Socket address the server listens on
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Server origin, e.g. `http://127.0.0.1:41234`
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for `path` on this server
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.url())
    }

    /// Paths requested so far, in arrival order
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.fixtures
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests made for exactly `path`
    #[must_use]
    pub fn request_count(&self, path: &str) -> usize {
        self.requests().iter().filter(|p| p.as_str() == path).count()
    }

    /// Shut the server down and wait for it to finish
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        tracing::debug!(addr = %self.addr, "mock API server stopped");
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl std::fmt::Debug for MockApiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockApiServer")
            .field("addr", &self.addr)
            .field("root", &self.fixtures.root)
            .finish_non_exhaustive()
    }
}

/// Maps a URL path onto a relative fixture path
///
/// Each segment is percent-decoded on its own. Segments that decode to `.`,
/// `..`, or anything containing a path separator are refused.
fn fixture_path(url_path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for segment in url_path.split('/').filter(|part| !part.is_empty()) {
        let segment = urlencoding::decode(segment).ok()?;
        if segment.contains(['/', '\\']) {
            return None;
        }
        let mut components = Path::new(&*segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => relative.push(part),
            _ => return None,
        }
    }
    Some(relative)
}

async fn serve_fixture(State(fixtures): State<Arc<FixtureRoot>>, uri: Uri) -> Response {
    let request_path = uri.path();
    fixtures.record(request_path);
    tracing::debug!(path = request_path, "mock API request");

    let Some(relative) = fixture_path(request_path) else {
        return (StatusCode::NOT_FOUND, format!("Cannot find path {request_path}")).into_response();
    };
    let path = fixtures.root.join(relative);

    let is_dir = tokio::fs::metadata(&path)
        .await
        .is_ok_and(|metadata| metadata.is_dir());

    if is_dir || request_path.ends_with('/') {
        serve_index(&path).await
    } else {
        serve_file(&path).await
    }
}

async fn serve_index(dir: &Path) -> Response {
    let index = dir.join("index.json");

    if !tokio::fs::try_exists(&index).await.unwrap_or(false) {
        return (
            StatusCode::NOT_FOUND,
            format!("Cannot find path {}", index.display()),
        )
            .into_response();
    }

    match tokio::fs::read_to_string(&index).await {
        Ok(contents) => json_response(contents),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response(),
    }
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(contents) => {
            let content_type = if path.extension().is_some_and(|ext| ext == "json") {
                "application/json"
            } else {
                "application/octet-stream"
            };
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], contents).into_response()
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            format!("Cannot find path {}", path.display()),
        )
            .into_response(),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response(),
    }
}

fn json_response(contents: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        contents,
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let api = dir.path().join("api").join("v1");
        std::fs::create_dir_all(api.join("empty")).unwrap();
        std::fs::create_dir_all(api.join("unreadable").join("index.json")).unwrap();
        std::fs::create_dir_all(api.join("with space")).unwrap();
        std::fs::write(api.join("with space").join("index.json"), r#"{"spaced": true}"#).unwrap();
        std::fs::write(api.join("index.json"), r#"{"recipe-list": "/api/v1/recipe/"}"#).unwrap();
        std::fs::write(api.join("schema.json"), r#"{"type": "object"}"#).unwrap();
        dir
    }

    #[test]
    fn test_fixture_path_rejects_parent_components() {
        assert_eq!(fixture_path("/api/v1/"), Some(PathBuf::from("api/v1")));
        assert_eq!(fixture_path("/"), Some(PathBuf::new()));
        assert_eq!(fixture_path("/api/../secret"), None);
        assert_eq!(fixture_path("/./api"), None);
    }

    #[test]
    fn test_fixture_path_decodes_segments() {
        assert_eq!(
            fixture_path("/api/v1/action/show%20heartbeat/"),
            Some(PathBuf::from("api/v1/action/show heartbeat"))
        );
        assert_eq!(fixture_path("/api/%2E%2E/secret"), None);
        assert_eq!(fixture_path("/api/v1/action/%2Fapi%2Fv1/"), None);
        assert_eq!(fixture_path("/api/v1/%5Cwindows"), None);
        assert_eq!(fixture_path("/api/%FF/"), None);
    }

    #[tokio::test]
    async fn test_serves_directory_index() {
        let dir = fixture_dir();
        let server = MockApiServer::start(dir.path()).await.unwrap();

        for path in ["/api/v1/", "/api/v1"] {
            let response = reqwest::get(server.api_url(path)).await.unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            assert_eq!(
                response.headers()[reqwest::header::CONTENT_TYPE],
                "application/json"
            );
            let body = response.text().await.unwrap();
            assert!(body.contains("/api/v1/recipe/"));
        }

        assert_eq!(server.request_count("/api/v1/"), 1);
        assert_eq!(server.requests().len(), 2);
        server.stop().await;
    }

    #[tokio::test]
    async fn test_missing_index_is_404() {
        let dir = fixture_dir();
        let server = MockApiServer::start(dir.path()).await.unwrap();

        let response = reqwest::get(server.api_url("/api/v1/empty/")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        let body = response.text().await.unwrap();
        assert!(body.starts_with("Cannot find path"));
        assert!(body.ends_with("index.json"));

        server.stop().await;
    }

    #[tokio::test]
    async fn test_unreadable_index_is_500() {
        let dir = fixture_dir();
        let server = MockApiServer::start(dir.path()).await.unwrap();

        let response = reqwest::get(server.api_url("/api/v1/unreadable/")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.text().await.unwrap();
        assert!(!body.is_empty());

        server.stop().await;
    }

    #[tokio::test]
    async fn test_serves_percent_encoded_paths() {
        let dir = fixture_dir();
        let server = MockApiServer::start(dir.path()).await.unwrap();

        let response = reqwest::get(server.api_url("/api/v1/with%20space/")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), r#"{"spaced": true}"#);

        let separator = reqwest::get(server.api_url("/api/%2Fv1/")).await.unwrap();
        assert_eq!(separator.status(), reqwest::StatusCode::NOT_FOUND);

        assert_eq!(server.request_count("/api/v1/with%20space/"), 1);
        server.stop().await;
    }

    #[tokio::test]
    async fn test_serves_plain_files() {
        let dir = fixture_dir();
        let server = MockApiServer::start(dir.path()).await.unwrap();

        let response = reqwest::get(server.api_url("/api/v1/schema.json")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), r#"{"type": "object"}"#);

        let missing = reqwest::get(server.api_url("/api/v1/nope.json")).await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

        server.stop().await;
    }
}
