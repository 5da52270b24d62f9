//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: extracts the file path, dispatches
//! to the [`Dispatcher`], maps the outcome to a response and applies CORS.

use crate::config::AppState;
use crate::handler::static_files::{Dispatcher, ServeError, DEFAULT_FILE};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD};
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Which of the two routes a request path hits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, served with [`DEFAULT_FILE`]
    Root,
    /// `/<path>`, captured in full including slashes
    File(String),
}

impl Route {
    /// Match a URI path (already stripped of its query string)
    pub fn from_uri_path(uri_path: &str) -> Self {
        let raw = uri_path.strip_prefix('/').unwrap_or(uri_path);
        if raw.is_empty() {
            return Self::Root;
        }
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .map_or_else(|_| raw.to_string(), |s| s.into_owned());
        Self::File(decoded)
    }

    /// The path handed to the dispatcher
    pub fn file_path(&self) -> &str {
        match self {
            Self::Root => DEFAULT_FILE,
            Self::File(path) => path,
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let response = route_request(&req, &state.dispatcher, state.config.server.debug).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri()
                .path_and_query()
                .map_or_else(|| req.uri().path().to_string(), ToString::to_string),
        );
        entry.http_version = format_version(req.version());
        entry.status = response.status().as_u16();
        entry.body_bytes = response_body_len(req.method(), &response);
        logger::log_access(&entry);
    }

    Ok(response)
}

/// Dispatch a request and build the CORS-enabled response
pub async fn route_request<B>(
    req: &Request<B>,
    dispatcher: &Dispatcher,
    debug: bool,
) -> Response<Full<Bytes>> {
    if let Some(resp) = check_preflight(req) {
        return http::apply_cors(resp);
    }

    let route = Route::from_uri_path(req.uri().path());
    let is_head = req.method() == Method::HEAD;

    let response = match dispatcher.serve(route.file_path()).await {
        Ok(file) => http::build_file_response(file.content, &file.content_type, is_head),
        Err(ServeError::NotFound { .. }) => http::build_404_response(),
        Err(err @ ServeError::Io { .. }) => {
            logger::log_error(&err.to_string());
            http::build_500_response(&err.to_string(), debug)
        }
    };

    http::apply_cors(response)
}

/// Answer CORS preflight requests before they reach the file dispatcher
fn check_preflight<B>(req: &Request<B>) -> Option<Response<Full<Bytes>>> {
    if req.method() != Method::OPTIONS {
        return None;
    }
    req.headers().get(ACCESS_CONTROL_REQUEST_METHOD)?;

    let request_headers = req
        .headers()
        .get(ACCESS_CONTROL_REQUEST_HEADERS)
        .and_then(|v| v.to_str().ok());
    Some(http::build_preflight_response(request_headers))
}

fn format_version(version: hyper::Version) -> String {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string()
}

/// Bytes actually sent; HEAD responses advertise a length but carry no body
fn response_body_len(method: &Method, response: &Response<Full<Bytes>>) -> usize {
    if method == Method::HEAD {
        return 0;
    }
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
    use hyper::StatusCode;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Dispatcher) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.html"), "<p>default</p>").unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Hi</h1>").unwrap();
        fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        fs::write(dir.path().join("my file.txt"), "spaced").unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/spells.json"), "[]").unwrap();
        let dispatcher = Dispatcher::new(dir.path());
        (dir, dispatcher)
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    async fn get(dispatcher: &Dispatcher, uri: &str) -> Response<Full<Bytes>> {
        route_request(&request(Method::GET, uri), dispatcher, true).await
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_route_matching() {
        assert_eq!(Route::from_uri_path("/"), Route::Root);
        assert_eq!(Route::from_uri_path(""), Route::Root);
        assert_eq!(
            Route::from_uri_path("/css/style.css"),
            Route::File("css/style.css".to_string())
        );
        assert_eq!(
            Route::from_uri_path("/my%20file.txt"),
            Route::File("my file.txt".to_string())
        );
        assert_eq!(Route::from_uri_path("/%FF.txt"), Route::File("%FF.txt".to_string()));
        assert_eq!(Route::Root.file_path(), DEFAULT_FILE);
    }

    #[tokio::test]
    async fn test_get_existing_file() {
        let (_dir, dispatcher) = fixture();
        let resp = get(&dispatcher, "/index.html").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_of(resp).await, "<h1>Hi</h1>");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let (_dir, dispatcher) = fixture();
        let resp = get(&dispatcher, "/missing.txt").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body_of(resp).await, "Not Found");
    }

    #[tokio::test]
    async fn test_root_matches_default_file() {
        let (_dir, dispatcher) = fixture();
        let root = get(&dispatcher, "/").await;
        let explicit = get(&dispatcher, "/default.html").await;
        assert_eq!(root.status(), explicit.status());
        assert_eq!(root.headers(), explicit.headers());
        assert_eq!(body_of(root).await, body_of(explicit).await);
    }

    #[tokio::test]
    async fn test_js_content_type() {
        let (_dir, dispatcher) = fixture();
        let resp = get(&dispatcher, "/app.js").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/javascript");
        assert_eq!(body_of(resp).await, "console.log(1);");
    }

    #[tokio::test]
    async fn test_query_string_ignored_and_path_decoded() {
        let (_dir, dispatcher) = fixture();
        let resp = get(&dispatcher, "/data/spells.json?v=3").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");

        let resp = get(&dispatcher, "/my%20file.txt").await;
        assert_eq!(body_of(resp).await, "spaced");
    }

    #[tokio::test]
    async fn test_any_method_serves_file() {
        let (_dir, dispatcher) = fixture();
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
            let resp = route_request(&request(method, "/index.html"), &dispatcher, true).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(body_of(resp).await, "<h1>Hi</h1>");
        }
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (_dir, dispatcher) = fixture();
        let resp = route_request(&request(Method::HEAD, "/index.html"), &dispatcher, true).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[hyper::header::CONTENT_LENGTH], "11");
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_preflight() {
        let (_dir, dispatcher) = fixture();
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/missing.txt")
            .header(ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "x-requested-with")
            .body(())
            .unwrap();
        let resp = route_request(&req, &dispatcher, true).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            resp.headers()[hyper::header::ACCESS_CONTROL_ALLOW_HEADERS],
            "x-requested-with"
        );
    }

    #[tokio::test]
    async fn test_directory_is_404() {
        let (_dir, dispatcher) = fixture();
        for uri in ["/data", "/data/"] {
            let resp = get(&dispatcher, uri).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert_eq!(body_of(resp).await, "Not Found");
        }
    }

    #[test]
    fn test_head_logs_no_body_bytes() {
        let resp = http::build_file_response(Bytes::from_static(b"<h1>Hi</h1>"), "text/html", true);
        assert_eq!(response_body_len(&Method::HEAD, &resp), 0);
        assert_eq!(response_body_len(&Method::GET, &resp), 11);

        let resp = http::build_404_response();
        assert_eq!(response_body_len(&Method::GET, &resp), 9);
    }

    #[test]
    fn test_format_version() {
        assert_eq!(format_version(hyper::Version::HTTP_10), "1.0");
        assert_eq!(format_version(hyper::Version::HTTP_11), "1.1");
    }
}
