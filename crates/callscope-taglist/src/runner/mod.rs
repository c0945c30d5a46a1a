//! Taglist orchestration.
//!
//! The [`TaglistRunner`] checks the target file, prefers an in-process
//! [`TagScript`](crate::script::TagScript) from the [`ScriptRegistry`] when
//! one exists for the requested language, and otherwise delegates to a
//! [`TagExecutor`].

use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::error::TaglistError;
use crate::process::ToolInvocation;
use crate::registry::ScriptRegistry;
use crate::request::TaglistRequest;
use crate::script::{render_vim, sort_by_name};

/// Tracing target for taglist orchestration.
const RUNNER_TARGET: &str = "callscope_taglist::runner";

/// Largest file handed to a tagger, in bytes.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024;

/// Trait abstracting external tool execution for testability.
///
/// The production implementation is
/// [`ExternalTagProcess`](crate::process::ExternalTagProcess).
pub trait TagExecutor {
    /// Runs the tool and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns a [`TaglistError`] if the tool cannot be spawned, times out
    /// or exits with a non-zero status.
    fn execute(&self, invocation: &ToolInvocation) -> Result<String, TaglistError>;
}

/// Answers taglist requests through scripts or an external tool.
#[derive(Debug)]
pub struct TaglistRunner<E> {
    registry: Arc<ScriptRegistry>,
    executor: E,
    tool: Utf8PathBuf,
    max_file_size: u64,
}

impl<E> TaglistRunner<E> {
    /// Creates a runner that launches `tool` through `executor`.
    #[must_use]
    pub fn new(registry: Arc<ScriptRegistry>, executor: E, tool: impl Into<Utf8PathBuf>) -> Self {
        Self {
            registry,
            executor,
            tool: tool.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Overrides the file size ceiling.
    #[must_use]
    pub const fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Returns the script registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ScriptRegistry> {
        &self.registry
    }
}

impl<E: TagExecutor> TaglistRunner<E> {
    /// Produces the tag listing for `request`.
    ///
    /// Missing files and files above the size ceiling yield an empty string
    /// without running anything.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the script registry, the script, or the
    /// executor.
    pub fn execute(&self, request: &TaglistRequest) -> Result<String, TaglistError> {
        if !self.is_taggable(request.file()) {
            return Ok(String::new());
        }

        if let Some(language) = request.language()
            && let Some(script) = self.registry.get(language)?
        {
            let mut entries = script.tags(request.file())?;
            if request.sort() {
                sort_by_name(&mut entries);
            }
            debug!(
                target: RUNNER_TARGET,
                language,
                tags = entries.len(),
                "listed tags with script"
            );
            return Ok(render_vim(&entries));
        }

        let invocation = ToolInvocation::new(self.tool.clone(), request.args().to_vec());
        self.executor.execute(&invocation)
    }

    fn is_taggable(&self, file: &Utf8Path) -> bool {
        match fs::metadata(file) {
            Ok(metadata) if metadata.len() <= self.max_file_size => true,
            Ok(metadata) => {
                debug!(
                    target: RUNNER_TARGET,
                    file = %file,
                    size = metadata.len(),
                    max_file_size = self.max_file_size,
                    "file not processed: too large"
                );
                false
            }
            Err(err) => {
                debug!(
                    target: RUNNER_TARGET,
                    file = %file,
                    error = %err,
                    "file not processed: not readable"
                );
                false
            }
        }
    }
}
