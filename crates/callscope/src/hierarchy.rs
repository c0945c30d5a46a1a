//! The `hierarchy` subcommand.
//!
//! Loads the configured snapshot, resolves the selection to a symbol and
//! prints its call hierarchy as JSON. A selection that names nothing prints
//! `{}`.

use std::io::Write;

use callscope_config::Config;
use callscope_graph::{
    Direction, FileLineResolver, HierarchyBuilder, HierarchyResponse, ResultFormatter,
    SharedIndex, SnapshotIndex, SymbolIndex,
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::AppError;
use crate::cli::HierarchyArgs;

const HIERARCHY_TARGET: &str = "callscope::hierarchy";

pub(crate) fn execute<W: Write>(
    args: &HierarchyArgs,
    config: &Config,
    stdout: &mut W,
) -> Result<(), AppError> {
    ensure_utf8(&args.encoding)?;
    let direction = if args.callees {
        Direction::Callees
    } else {
        Direction::Callers
    };

    let index_path = beneath(&args.project, config.index_path());
    debug!(target: HIERARCHY_TARGET, path = %index_path, "loading index snapshot");
    let index = SharedIndex::new(SnapshotIndex::load(&index_path)?);

    let response = respond(&index, args, direction)?;
    serde_json::to_writer_pretty(&mut *stdout, &response).map_err(AppError::SerialiseResponse)?;
    stdout.write_all(b"\n").map_err(AppError::WriteOutput)?;
    stdout.flush().map_err(AppError::WriteOutput)
}

fn respond(
    index: &SharedIndex<SnapshotIndex>,
    args: &HierarchyArgs,
    direction: Direction,
) -> Result<HierarchyResponse, AppError> {
    let resource = project_relative(&args.project, &args.file);
    let guard = index.read()?;
    let Some(symbol) = guard.symbol_at(&resource, args.offset, args.length)? else {
        debug!(
            target: HIERARCHY_TARGET,
            resource = %resource,
            offset = args.offset,
            "selection names no symbol"
        );
        return Ok(HierarchyResponse::unresolved());
    };

    let hierarchy = HierarchyBuilder::new(&*guard).build(&symbol, direction)?;
    info!(
        target: HIERARCHY_TARGET,
        symbol = symbol.name(),
        ?direction,
        children = hierarchy.children().len(),
        "call hierarchy built"
    );
    let formatter = ResultFormatter::with_resolver(FileLineResolver::rooted(args.project.clone()));
    Ok(HierarchyResponse::resolved(formatter.format(&hierarchy)))
}

/// Accepts the spellings of UTF-8; offsets in any other encoding would be
/// misread as byte offsets.
fn ensure_utf8(encoding: &str) -> Result<(), AppError> {
    if encoding.eq_ignore_ascii_case("utf-8") || encoding.eq_ignore_ascii_case("utf8") {
        Ok(())
    } else {
        Err(AppError::UnsupportedEncoding(encoding.to_owned()))
    }
}

fn beneath(project: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_owned()
    } else {
        project.join(path)
    }
}

/// Index resources are recorded relative to the project root.
fn project_relative(project: &Utf8Path, file: &Utf8Path) -> Utf8PathBuf {
    file.strip_prefix(project)
        .map_or_else(|_| file.to_owned(), Utf8Path::to_path_buf)
}
