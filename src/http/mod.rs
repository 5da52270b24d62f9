//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from file dispatch.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cors::apply_cors;
pub use response::{
    build_404_response, build_500_response, build_file_response, build_preflight_response,
};
