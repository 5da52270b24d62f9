//! MIME type detection module
//!
//! Returns the Content-Type for a path: an explicit override table is
//! consulted first, then the generic extension lookup.

use std::path::Path;

/// Extension overrides, checked before the generic lookup.
///
/// Some platform tables report `.js` as `text/javascript` or not at all.
const OVERRIDES: &[(&str, &str)] = &[("js", "application/javascript")];

/// Returned when neither the override table nor the lookup knows the extension
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Look up an override for the path's extension (case-sensitive, like the suffix check)
pub fn override_for(path: &str) -> Option<&'static str> {
    OVERRIDES
        .iter()
        .find(|(ext, _)| {
            path.strip_suffix(ext)
                .is_some_and(|stem| stem.ends_with('.'))
        })
        .map(|(_, content_type)| *content_type)
}

/// Get MIME Content-Type for a request path and its resolved file
///
/// # Examples
/// ```
/// use devserve::http::mime::content_type_for;
/// use std::path::Path;
/// assert_eq!(content_type_for("app.js", Path::new("/srv/app.js")), "application/javascript");
/// assert_eq!(content_type_for("index.html", Path::new("/srv/index.html")), "text/html");
/// assert_eq!(content_type_for("blob", Path::new("/srv/blob")), "application/octet-stream");
/// ```
pub fn content_type_for(request_path: &str, resolved: &Path) -> String {
    if let Some(content_type) = override_for(request_path) {
        return content_type.to_string();
    }
    mime_guess::from_path(resolved)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}
