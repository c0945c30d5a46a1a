//! Command-line interface definitions.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Call hierarchy and tag listing tool.
#[derive(Parser, Debug)]
#[command(name = "callscope", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands accepted after the configuration flags.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Prints the call hierarchy of the symbol at a selection as JSON.
    Hierarchy(HierarchyArgs),
    /// Lists the tags of a file in Vim taglist format.
    Taglist(TaglistArgs),
}

/// Selection and direction for `hierarchy`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct HierarchyArgs {
    /// Project root that relative paths are resolved against.
    #[arg(long)]
    pub(crate) project: Utf8PathBuf,
    /// File holding the selection.
    #[arg(long)]
    pub(crate) file: Utf8PathBuf,
    /// Byte offset of the selection.
    #[arg(long)]
    pub(crate) offset: u32,
    /// Length of the selection in bytes.
    #[arg(long, default_value_t = 0)]
    pub(crate) length: u32,
    /// Encoding of the selection offsets.
    #[arg(long, default_value = "utf-8")]
    pub(crate) encoding: String,
    /// Walks callees instead of callers.
    #[arg(long)]
    pub(crate) callees: bool,
}

/// Arguments forwarded to the tag tool; the last one names the file.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct TaglistArgs {
    /// Tool arguments followed by the target file.
    #[arg(
        value_name = "ARG",
        num_args = 1..,
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) arguments: Vec<String>,
}
