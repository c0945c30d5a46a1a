//! Call hierarchy edges.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::occurrence::NameOccurrence;
use crate::symbol::Symbol;

/// Direction of a traversal, fixed for a whole request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Who calls the symbol.
    #[default]
    Callers,
    /// What the symbol calls.
    Callees,
}

impl Direction {
    /// Returns the label used for child lists in responses.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Callers => "callers",
            Self::Callees => "callees",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "callers" => Ok(Self::Callers),
            "callees" => Ok(Self::Callees),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

/// One edge of a call hierarchy.
///
/// `children` is `None` for a leaf: the related symbol was already expanded
/// elsewhere in the same traversal. An expanded symbol with no further calls
/// has `Some` of an empty vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEdgeNode {
    symbol: Symbol,
    occurrence: NameOccurrence,
    children: Option<Vec<CallEdgeNode>>,
}

impl CallEdgeNode {
    /// Creates an edge with no subtree attached.
    #[must_use]
    pub const fn new(symbol: Symbol, occurrence: NameOccurrence) -> Self {
        Self {
            symbol,
            occurrence,
            children: None,
        }
    }

    /// Attaches the expanded subtree.
    pub fn expand(&mut self, children: Vec<Self>) {
        self.children = Some(children);
    }

    /// Returns the caller or callee at the far end of the edge.
    #[must_use]
    pub const fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Returns the occurrence that established the edge.
    #[must_use]
    pub const fn occurrence(&self) -> &NameOccurrence {
        &self.occurrence
    }

    /// Returns the subtree when this edge was expanded.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }

    /// Returns `true` when this edge's symbol was expanded here.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.children.is_some()
    }
}
