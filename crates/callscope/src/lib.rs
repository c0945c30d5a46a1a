//! Runtime for the `callscope` command-line tool.
//!
//! [`run`] splits leading configuration flags from the subcommand, loads the
//! layered configuration, installs telemetry and dispatches to `hierarchy`
//! or `taglist`. Results go to stdout; failures are reported on stderr with
//! a failing exit status.

mod cli;
mod config;
mod errors;
mod hierarchy;
mod taglist;
mod telemetry;


use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::{Cli, CliCommand};
use crate::config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
pub(crate) use crate::errors::AppError;

/// Runs the CLI against `args`, writing results to `stdout` and diagnostics
/// to `stderr`.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    match execute(args, stdout, loader) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::CliUsage(error))
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            drop(write!(stdout, "{}", error.render()));
            ExitCode::SUCCESS
        }
        Err(error) => {
            drop(writeln!(stderr, "{error}"));
            ExitCode::FAILURE
        }
    }
}

fn execute<I, W, L>(args: I, stdout: &mut W, loader: &L) -> Result<(), AppError>
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    L: ConfigLoader,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&arguments);
    let cli = Cli::try_parse_from(&split.command_arguments).map_err(AppError::CliUsage)?;
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    match cli.command {
        CliCommand::Hierarchy(selection) => hierarchy::execute(&selection, &config, stdout),
        CliCommand::Taglist(request) => taglist::execute(request, &config, stdout),
    }
}
