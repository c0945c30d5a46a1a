//! Serialisable response trees.
//!
//! [`ResultFormatter`] turns a [`CallHierarchy`] into nested
//! [`HierarchyNode`]s. Only expanded nodes carry a child list, labelled
//! `callers` or `callees` after the traversal direction; a node without one
//! was already shown elsewhere in the same response.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::rc::Rc;

use camino::{Utf8Path, Utf8PathBuf};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::builder::CallHierarchy;
use crate::edge::{CallEdgeNode, Direction};

/// Location attached to a response node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePosition {
    /// Resource path with forward slashes.
    pub file: String,
    /// Byte offset within the resource.
    pub offset: u32,
    /// One-based line, when the resource could be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// One-based byte column, when the resource could be read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

/// One node of a formatted hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// `<qualifiedName>(<paramType>, ...)`.
    pub name: String,
    /// Where the triggering occurrence sits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ResponsePosition>,
    /// Callers, present only on expanded nodes of a callers traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callers: Option<Vec<HierarchyNode>>,
    /// Callees, present only on expanded nodes of a callees traversal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callees: Option<Vec<HierarchyNode>>,
}

impl HierarchyNode {
    fn new(
        name: String,
        position: Option<ResponsePosition>,
        children: Option<Vec<Self>>,
        direction: Direction,
    ) -> Self {
        let (callers, callees) = match direction {
            Direction::Callers => (children, None),
            Direction::Callees => (None, children),
        };
        Self {
            name,
            position,
            callers,
            callees,
        }
    }

    /// Returns the child list whichever direction labels it.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        self.callers.as_deref().or(self.callees.as_deref())
    }
}

/// Top-level response: a hierarchy, or `{}` when the selection resolved to
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HierarchyResponse(Option<HierarchyNode>);

impl HierarchyResponse {
    /// Wraps a formatted hierarchy.
    #[must_use]
    pub const fn resolved(root: HierarchyNode) -> Self {
        Self(Some(root))
    }

    /// The response for a selection that names no symbol.
    #[must_use]
    pub const fn unresolved() -> Self {
        Self(None)
    }

    /// Returns the root node, if any.
    #[must_use]
    pub const fn root(&self) -> Option<&HierarchyNode> {
        self.0.as_ref()
    }
}

impl Serialize for HierarchyResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(root) => root.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Maps byte offsets in a resource to line and column numbers.
pub trait PositionResolver {
    /// Returns the one-based `(line, column)` of `offset` in `resource`.
    fn line_column(&self, resource: &Utf8Path, offset: u32) -> Option<(u32, u32)>;
}

/// Resolver that never reports line information.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLineInfo;

impl PositionResolver for NoLineInfo {
    fn line_column(&self, _resource: &Utf8Path, _offset: u32) -> Option<(u32, u32)> {
        None
    }
}

/// Resolver that reads resources from disk, caching line starts per file.
///
/// Relative resources are read beneath the resolver's root. Unreadable files
/// are cached as misses and yield no line information.
#[derive(Debug, Default)]
pub struct FileLineResolver {
    root: Option<Utf8PathBuf>,
    cache: RefCell<HashMap<Utf8PathBuf, Option<Rc<LineTable>>>>,
}

impl FileLineResolver {
    /// Creates a resolver that reads resources as given.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that reads relative resources beneath `root`.
    #[must_use]
    pub fn rooted(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            cache: RefCell::default(),
        }
    }

    fn table(&self, resource: &Utf8Path) -> Option<Rc<LineTable>> {
        let mut cache = self.cache.borrow_mut();
        cache
            .entry(resource.to_owned())
            .or_insert_with(|| {
                let path = match &self.root {
                    Some(root) => root.join(resource),
                    None => resource.to_owned(),
                };
                fs::read(path)
                    .ok()
                    .map(|bytes| Rc::new(LineTable::new(&bytes)))
            })
            .clone()
    }
}

impl PositionResolver for FileLineResolver {
    fn line_column(&self, resource: &Utf8Path, offset: u32) -> Option<(u32, u32)> {
        self.table(resource)?.line_column(offset)
    }
}

/// Byte offsets at which each line of a file starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTable {
    starts: Vec<u32>,
    len: u32,
}

impl LineTable {
    /// Indexes the line starts of `contents`.
    #[must_use]
    pub fn new(contents: &[u8]) -> Self {
        let mut starts = vec![0];
        starts.extend(
            contents
                .iter()
                .enumerate()
                .filter(|(_, byte)| **byte == b'\n')
                .filter_map(|(position, _)| u32::try_from(position + 1).ok()),
        );
        Self {
            starts,
            len: u32::try_from(contents.len()).unwrap_or(u32::MAX),
        }
    }

    /// Returns the one-based `(line, column)` of `offset`, or `None` past
    /// the end of the file.
    #[must_use]
    pub fn line_column(&self, offset: u32) -> Option<(u32, u32)> {
        if offset > self.len {
            return None;
        }
        let following = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts.get(following.checked_sub(1)?)?;
        Some((u32::try_from(following).ok()?, offset - start + 1))
    }
}

/// Converts built hierarchies into response trees.
#[derive(Debug, Default)]
pub struct ResultFormatter<R = NoLineInfo> {
    resolver: R,
}

impl ResultFormatter<NoLineInfo> {
    /// Creates a formatter that emits byte offsets only.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            resolver: NoLineInfo,
        }
    }
}

impl<R: PositionResolver> ResultFormatter<R> {
    /// Creates a formatter that adds line and column through `resolver`.
    #[must_use]
    pub const fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    /// Formats a hierarchy. The root is always expanded and positioned at
    /// its own definition.
    #[must_use]
    pub fn format(&self, hierarchy: &CallHierarchy) -> HierarchyNode {
        let root = hierarchy.root();
        let direction = hierarchy.direction();
        let location = root.location();
        let children = hierarchy
            .children()
            .iter()
            .map(|edge| self.format_edge(edge, direction))
            .collect();
        HierarchyNode::new(
            root.signature(),
            Some(self.position(location.resource(), location.offset())),
            Some(children),
            direction,
        )
    }

    fn format_edge(&self, edge: &CallEdgeNode, direction: Direction) -> HierarchyNode {
        let occurrence = edge.occurrence();
        let position = occurrence
            .resource()
            .map(|resource| self.position(resource, occurrence.offset()));
        let children = edge.children().map(|children| {
            children
                .iter()
                .map(|child| self.format_edge(child, direction))
                .collect()
        });
        HierarchyNode::new(edge.symbol().signature(), position, children, direction)
    }

    fn position(&self, resource: &Utf8Path, offset: u32) -> ResponsePosition {
        let line_column = self.resolver.line_column(resource, offset);
        ResponsePosition {
            file: resource.as_str().replace('\\', "/"),
            offset,
            line: line_column.map(|(line, _)| line),
            column: line_column.map(|(_, column)| column),
        }
    }
}
