//! Call hierarchy construction over a cross-reference index.
//!
//! Given a resolved root [`Symbol`] and a [`Direction`], the
//! [`HierarchyBuilder`] walks a [`SymbolIndex`] depth-first and produces a
//! [`CallHierarchy`]: a tree in which every distinct symbol is expanded once
//! and every sibling list is sorted by [`sort_siblings`]. The
//! [`ResultFormatter`] turns that tree into serialisable [`HierarchyNode`]s.
//!
//! # Core Types
//!
//! - [`SymbolIndex`] - the read-only query surface the builder consumes
//! - [`SharedIndex`] - a reader/writer guarded index shared between requests
//! - [`SnapshotIndex`] - an index loaded from a JSON snapshot
//! - [`OverrideResolver`] - the override lookup negotiated once per builder
//!
//! # Example
//!
//! ```ignore
//! use callscope_graph::{Direction, HierarchyBuilder, ResultFormatter, SharedIndex};
//!
//! let index = SharedIndex::new(SnapshotIndex::load(path)?);
//! let guard = index.read()?;
//! if let Some(root) = guard.symbol_at(file, offset, length)? {
//!     let hierarchy = HierarchyBuilder::new(&*guard).build(&root, Direction::Callers)?;
//!     let response = ResultFormatter::new().format(&hierarchy);
//! }
//! ```

mod builder;
mod capability;
mod collate;
mod edge;
mod error;
mod index;
mod occurrence;
mod response;
mod seen;
mod shared;
mod snapshot;
mod symbol;

pub use builder::{CallHierarchy, HierarchyBuilder};
pub use capability::OverrideResolver;
pub use collate::{collate, sort_siblings};
pub use edge::{CallEdgeNode, Direction};
pub use error::GraphError;
pub use index::{Binding, BindingId, OverrideLookupShape, SymbolIndex};
pub use occurrence::{NameOccurrence, OccurrenceId};
pub use response::{
    FileLineResolver, HierarchyNode, HierarchyResponse, LineTable, NoLineInfo, PositionResolver,
    ResponsePosition, ResultFormatter,
};
pub use seen::SeenSet;
pub use shared::SharedIndex;
pub use snapshot::{BindingRecord, IndexSnapshot, NameRecord, NameRole, SnapshotIndex};
pub use symbol::{SourceLocation, Symbol, SymbolId, SymbolKind};

#[cfg(test)]
mod tests;
