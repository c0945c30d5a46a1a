//! Shared configuration for the callscope binary.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional configuration file named by `--config-path`, then `CALLSCOPE_*`
//! environment variables, then command-line flags. Every field is optional
//! in the merged document; the accessors on [`Config`] substitute the
//! defaults from this crate when a layer leaves a value unset.

mod defaults;
mod logging;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_CTAGS_PATH, DEFAULT_INDEX_PATH, DEFAULT_LOG_FILTER, DEFAULT_TAG_MAX_FILE_SIZE,
    DEFAULT_TAG_TIMEOUT_SECS, default_ctags_path, default_index_path, default_log_filter,
    default_log_format,
};
pub use logging::LogFormat;

/// Command-line flags consumed by the configuration loader rather than by
/// the command parser.
pub const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--index-path",
    "--ctags-path",
    "--tag-timeout-secs",
    "--tag-max-file-size",
];

/// Merged runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "CALLSCOPE")]
pub struct Config {
    /// Tracing filter expression, for example `info` or `callscope_graph=trace`.
    pub log_filter: Option<String>,
    /// Output format for log records.
    pub log_format: Option<LogFormat>,
    /// Path of the JSON cross-reference snapshot queried by `hierarchy`.
    pub index_path: Option<Utf8PathBuf>,
    /// Tag extraction tool invoked by `taglist`.
    pub ctags_path: Option<Utf8PathBuf>,
    /// Seconds allowed for one tag extraction run.
    pub tag_timeout_secs: Option<u64>,
    /// Largest file, in bytes, handed to the tag extraction tool.
    pub tag_max_file_size: Option<u64>,
}

impl Config {
    /// Returns the effective log filter.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Returns the effective log format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }

    /// Returns the effective snapshot path.
    #[must_use]
    pub fn index_path(&self) -> &Utf8Path {
        self.index_path
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_INDEX_PATH))
    }

    /// Returns the effective tag tool path.
    #[must_use]
    pub fn ctags_path(&self) -> &Utf8Path {
        self.ctags_path
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_CTAGS_PATH))
    }

    /// Returns the tag extraction deadline.
    #[must_use]
    pub fn tag_timeout(&self) -> Duration {
        Duration::from_secs(self.tag_timeout_secs.unwrap_or(DEFAULT_TAG_TIMEOUT_SECS))
    }

    /// Returns the tag extraction file size ceiling in bytes.
    #[must_use]
    pub fn tag_max_file_size(&self) -> u64 {
        self.tag_max_file_size.unwrap_or(DEFAULT_TAG_MAX_FILE_SIZE)
    }
}
