//! Request handler module
//!
//! Responsible for request routing dispatch and static file serving.

pub mod router;
pub mod static_files;

// Re-export main entry points
pub use router::handle_request;
pub use static_files::{Dispatcher, ServeError, ServedFile, DEFAULT_FILE};
