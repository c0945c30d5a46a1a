//! Tag listing for source files.
//!
//! A taglist request is the argument vector a user would pass to `ctags`,
//! with the target file last. The [`TaglistRunner`] skips missing and
//! oversized files, answers from an in-process [`TagScript`] when the
//! [`ScriptRegistry`] has one for the forced language, and otherwise runs the
//! external tool through [`ExternalTagProcess`], which enforces a deadline
//! and reports timeouts separately from failures.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use callscope_taglist::{ExternalTagProcess, ScriptRegistry, TaglistRequest, TaglistRunner};
//!
//! let runner = TaglistRunner::new(
//!     Arc::new(ScriptRegistry::default()),
//!     ExternalTagProcess::default(),
//!     "ctags",
//! );
//! let request = TaglistRequest::parse(vec!["-f".into(), "-".into(), "src/main.c".into()])?;
//! let listing = runner.execute(&request)?;
//! # Ok::<(), callscope_taglist::TaglistError>(())
//! ```

pub mod error;
pub mod process;
pub mod registry;
pub mod request;
pub mod runner;
pub mod script;


pub use self::error::TaglistError;
pub use self::process::{ExternalTagProcess, ToolInvocation};
pub use self::registry::{BuiltinScripts, ScriptLoader, ScriptRegistry, SharedScript};
pub use self::request::TaglistRequest;
pub use self::runner::{DEFAULT_MAX_FILE_SIZE, TagExecutor, TaglistRunner};
pub use self::script::{IniTagScript, TagEntry, TagScript, render_vim, sort_by_name};
