//! Static file dispatch module
//!
//! Resolves request paths against the base directory, detects MIME types and
//! loads file contents.

use crate::http::mime;
use crate::logger;
use hyper::body::Bytes;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

/// File served for the root path
pub const DEFAULT_FILE: &str = "default.html";

/// A file ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    pub content: Bytes,
    pub content_type: String,
}

/// Reasons a request path could not be served
#[derive(Debug)]
pub enum ServeError {
    /// Nothing exists at the resolved path
    NotFound { path: PathBuf },
    /// The path existed but reading it failed
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "file not found: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "failed to read '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Serves files from a fixed base directory.
///
/// The base directory is set at construction and never changes. Paths are
/// joined as given: `..` segments and symlinks are passed through to the
/// filesystem unchanged.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    base_dir: Arc<Path>,
}

impl Dispatcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Arc::from(base_dir.into()),
        }
    }

    /// Directory containing the running executable
    pub fn from_current_exe() -> io::Result<Self> {
        let exe = std::env::current_exe()?.canonicalize()?;
        let dir = exe
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "executable has no parent directory"))?;
        Ok(Self::new(dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Join a request path onto the base directory
    ///
    /// Leading slashes are stripped so the result never escapes via an absolute join.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path.trim_start_matches('/'))
    }

    /// Serve the file at `path`, relative to the base directory.
    ///
    /// An empty path serves [`DEFAULT_FILE`].
    pub async fn serve(&self, path: &str) -> Result<ServedFile, ServeError> {
        let path = if path.is_empty() { DEFAULT_FILE } else { path };
        let full_path = self.resolve(path);

        logger::log_debug(&format!("Requested URL path: {path}"));
        logger::log_debug(&format!("Full filesystem path: {}", full_path.display()));

        // Directories and other non-regular files are treated as missing
        let is_file = fs::metadata(&full_path)
            .await
            .is_ok_and(|meta| meta.is_file());
        if !is_file {
            logger::log_debug(&format!("File not found: {}", full_path.display()));
            return Err(ServeError::NotFound { path: full_path });
        }

        let content_type = mime::content_type_for(path, &full_path);
        logger::log_debug(&format!("Serving with MIME type: {content_type}"));

        match fs::read(&full_path).await {
            Ok(content) => Ok(ServedFile {
                content: Bytes::from(content),
                content_type,
            }),
            Err(source) => Err(ServeError::Io {
                path: full_path,
                source,
            }),
        }
    }
}
