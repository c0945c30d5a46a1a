//! Domain errors raised while listing tags.
//!
//! Timeouts are reported separately from non-zero exits so callers can tell
//! a hung tool from a failing one. I/O errors are wrapped in `Arc` to satisfy
//! the `result_large_err` Clippy lint.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from taglist requests.
#[derive(Debug, Clone, Error)]
pub enum TaglistError {
    /// The argument vector cannot be interpreted.
    #[error("invalid taglist request: {message}")]
    InvalidRequest {
        /// Description of the problem.
        message: String,
    },

    /// The external tool could not be started.
    #[error("tag tool '{tool}' failed to start: {source}")]
    SpawnFailed {
        /// Tool that was launched.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The external tool did not finish before its deadline.
    #[error("tag tool '{tool}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Tool that was launched.
        tool: String,
        /// Deadline in milliseconds.
        timeout_ms: u64,
    },

    /// The external tool exited with a non-zero status.
    #[error("tag tool '{tool}' exited with status {status}: {stderr}")]
    NonZeroExit {
        /// Tool that was launched.
        tool: String,
        /// Process exit status, `-1` when killed by a signal.
        status: i32,
        /// Everything the tool wrote to standard error.
        stderr: String,
    },

    /// Communicating with the external tool failed.
    #[error("I/O error communicating with tag tool '{tool}': {source}")]
    Io {
        /// Tool that was launched.
        tool: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A source file could not be read by a tag script.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A tag script could not be loaded.
    #[error("tag script for '{language}' failed to load: {message}")]
    ScriptLoad {
        /// Language whose script was requested.
        language: String,
        /// Description of the failure.
        message: String,
    },

    /// The script registry lock was poisoned by a panicking holder.
    #[error("tag script registry lock poisoned")]
    LockPoisoned,
}

impl TaglistError {
    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `SpawnFailed` error.
    #[must_use]
    pub fn spawn_failed(tool: impl Into<String>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            tool: tool.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new `Io` error.
    #[must_use]
    pub fn io(tool: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            tool: tool.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new `Read` error.
    #[must_use]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}
