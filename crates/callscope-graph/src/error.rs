//! Error types for call hierarchy operations.
//!
//! Only infrastructure failures are errors. A symbol that cannot be resolved,
//! has no binding, or has no definition yields an empty result instead.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors returned by index access and hierarchy construction.
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    /// The index lock was poisoned by a panicking holder.
    #[error("index lock poisoned while acquiring {access} access")]
    LockPoisoned {
        /// Kind of access that was requested (`read` or `write`).
        access: &'static str,
    },

    /// An index query failed.
    #[error("index query '{query}' failed: {message}")]
    Query {
        /// Name of the failing query.
        query: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// A cross-reference snapshot could not be loaded.
    #[error("invalid index snapshot: {message}")]
    Snapshot {
        /// Description of the problem.
        message: String,
        /// Underlying JSON error, when parsing failed.
        #[source]
        source: Option<Arc<serde_json::Error>>,
    },

    /// An IO error occurred while reading index or source files.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error wrapped in Arc for Clone support.
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl GraphError {
    /// Creates a new `Query` error.
    #[must_use]
    pub fn query(query: &'static str, message: impl Into<String>) -> Self {
        Self::Query {
            query,
            message: message.into(),
        }
    }

    /// Creates a new `Snapshot` error without an underlying parse error.
    #[must_use]
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new `Snapshot` error from a JSON parse failure.
    #[must_use]
    pub fn snapshot_parse(source: serde_json::Error) -> Self {
        Self::Snapshot {
            message: source.to_string(),
            source: Some(Arc::new(source)),
        }
    }

    /// Creates a new `Io` error.
    #[must_use]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}
