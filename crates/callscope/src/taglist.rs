//! The `taglist` subcommand.

use std::io::Write;
use std::sync::Arc;

use callscope_config::Config;
use callscope_taglist::{ExternalTagProcess, ScriptRegistry, TaglistRequest, TaglistRunner};

use crate::AppError;
use crate::cli::TaglistArgs;

pub(crate) fn execute<W: Write>(
    args: TaglistArgs,
    config: &Config,
    stdout: &mut W,
) -> Result<(), AppError> {
    let request = TaglistRequest::parse(args.arguments)?;
    let runner = TaglistRunner::new(
        Arc::new(ScriptRegistry::default()),
        ExternalTagProcess::new(config.tag_timeout()),
        config.ctags_path(),
    )
    .with_max_file_size(config.tag_max_file_size());

    let listing = runner.execute(&request)?;
    stdout
        .write_all(listing.as_bytes())
        .map_err(AppError::WriteOutput)?;
    stdout.flush().map_err(AppError::WriteOutput)
}
