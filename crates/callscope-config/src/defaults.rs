use camino::Utf8PathBuf;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default location of the cross-reference snapshot.
pub const DEFAULT_INDEX_PATH: &str = "callscope-index.json";

/// Default tag extraction tool, resolved through `PATH`.
pub const DEFAULT_CTAGS_PATH: &str = "ctags";

/// Wall-clock budget for a single tag extraction run.
pub const DEFAULT_TAG_TIMEOUT_SECS: u64 = 10;

/// Files larger than this many bytes are never handed to the tag tool.
pub const DEFAULT_TAG_MAX_FILE_SIZE: u64 = 500 * 1024;

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Default path of the cross-reference snapshot.
#[must_use]
pub fn default_index_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_INDEX_PATH)
}

/// Default path of the tag extraction tool.
#[must_use]
pub fn default_ctags_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_CTAGS_PATH)
}
