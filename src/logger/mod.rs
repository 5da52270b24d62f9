//! Logger module
//!
//! Provides logging utilities for the development server including:
//! - Server lifecycle logging
//! - Per-request debug diagnostics
//! - Access logging in Common Log Format
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::OnceLock;

/// Process-wide log level, set once by [`init`]
static LOG_LEVEL: OnceLock<Level> = OnceLock::new();

/// Log severity, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parse a level name; unknown names fall back to `Info`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Later calls are ignored.
pub fn init(config: &Config) {
    let _ = LOG_LEVEL.set(effective_level(config));
}

/// Configured level, raised to `Info` when debug mode is off
fn effective_level(config: &Config) -> Level {
    let level = Level::parse(&config.logging.level);
    if config.server.debug {
        level
    } else {
        level.max(Level::Info)
    }
}

fn enabled(level: Level) -> bool {
    level >= LOG_LEVEL.get().copied().unwrap_or(Level::Debug)
}

fn write_info(message: &str) {
    if enabled(Level::Info) {
        println!("{message}");
    }
}

fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_debug(message: &str) {
    if enabled(Level::Debug) {
        println!("[DEBUG] {message}");
    }
}

pub fn log_warning(message: &str) {
    if enabled(Level::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_server_start(addr: &SocketAddr, base_dir: &Path, config: &Config) {
    write_info("======================================");
    write_info("Development server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Serving from project root: {}", base_dir.display()));
    write_info(&format!("Debug mode: {}", if config.server.debug { "on" } else { "off" }));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format_common());
}

pub fn log_shutdown() {
    write_info("\n[Shutdown] Server stopped");
}
