//! Cross-origin header policy
//!
//! Every response leaves the server readable from any origin.

use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::Response;

pub const ALLOW_ANY_ORIGIN: &str = "*";

/// Methods advertised in preflight responses
pub const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";

/// Add `Access-Control-Allow-Origin: *` to a response
pub fn apply_cors<B>(mut response: Response<B>) -> Response<B> {
    response.headers_mut().insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ANY_ORIGIN),
    );
    response
}
