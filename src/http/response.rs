//! HTTP response building module
//!
//! Provides builders for the responses the dispatcher emits. CORS headers are
//! applied by the router, not here.

use crate::http::cors::ALLOWED_METHODS;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_LENGTH, CONTENT_TYPE,
};
use hyper::{Response, StatusCode};

pub const NOT_FOUND_BODY: &str = "Not Found";
pub const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Build 200 response carrying file bytes
///
/// For HEAD requests the headers describe the file but the body is empty.
pub fn build_file_response(data: Bytes, content_type: &str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, NOT_FOUND_BODY.to_string())
}

/// Build 500 response
///
/// In debug mode the error text is included in the body.
pub fn build_500_response(detail: &str, debug: bool) -> Response<Full<Bytes>> {
    let body = if debug {
        format!("{INTERNAL_ERROR_BODY}\n\n{detail}")
    } else {
        INTERNAL_ERROR_BODY.to_string()
    };
    build_text_response(StatusCode::INTERNAL_SERVER_ERROR, body)
}

/// Build CORS preflight response
///
/// Requested headers are echoed back so any header the page sends is allowed.
pub fn build_preflight_response(request_headers: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS)
        .header(CONTENT_LENGTH, 0);

    if let Some(headers) = request_headers {
        builder = builder.header(ACCESS_CONTROL_ALLOW_HEADERS, headers);
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

fn build_text_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, body.len())
        .body(Full::new(Bytes::from(body.clone())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
