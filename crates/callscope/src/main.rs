//! CLI entrypoint for callscope.
//!
//! The binary delegates to [`callscope::run`], which loads configuration,
//! parses the subcommand and writes its result to stdout.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    callscope::run(std::env::args_os(), &mut stdout, &mut stderr)
}
