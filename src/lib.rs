//! A local development HTTP server that serves static files from the
//! directory containing its executable, with debug logging and permissive
//! cross-origin headers.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
