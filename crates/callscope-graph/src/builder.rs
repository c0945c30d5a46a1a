//! Depth-first construction of call hierarchies.
//!
//! The builder walks the index from a root symbol in one direction, sorts
//! every sibling list with [`sort_siblings`], and expands each distinct
//! symbol once. It performs no locking; hold a read guard on the index for
//! the full call to [`HierarchyBuilder::build`].

use tracing::{debug, trace};

use crate::capability::OverrideResolver;
use crate::collate::sort_siblings;
use crate::edge::{CallEdgeNode, Direction};
use crate::error::GraphError;
use crate::index::SymbolIndex;
use crate::occurrence::NameOccurrence;
use crate::seen::SeenSet;
use crate::symbol::Symbol;

/// Tracing target for hierarchy construction.
const BUILDER_TARGET: &str = "callscope_graph::builder";

/// A complete traversal result: the root and its expanded children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHierarchy {
    root: Symbol,
    direction: Direction,
    children: Vec<CallEdgeNode>,
}

impl CallHierarchy {
    /// Returns the symbol the traversal started from.
    #[must_use]
    pub const fn root(&self) -> &Symbol {
        &self.root
    }

    /// Returns the traversal direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the root's sorted edges.
    #[must_use]
    pub fn children(&self) -> &[CallEdgeNode] {
        &self.children
    }
}

/// Expands callers or callees of a symbol into a sorted, cycle-free tree.
#[derive(Debug)]
pub struct HierarchyBuilder<'index, I: ?Sized> {
    index: &'index I,
    overrides: OverrideResolver,
}

impl<'index, I: SymbolIndex + ?Sized> HierarchyBuilder<'index, I> {
    /// Creates a builder over `index`, negotiating the override lookup once.
    #[must_use]
    pub fn new(index: &'index I) -> Self {
        Self {
            index,
            overrides: OverrideResolver::negotiate(index),
        }
    }

    /// Returns the override lookup this builder negotiated.
    #[must_use]
    pub const fn overrides(&self) -> OverrideResolver {
        self.overrides
    }

    /// Builds the hierarchy of `root` in `direction`.
    ///
    /// The root is recorded as seen before its children are computed, so a
    /// recursive call back to it appears as a leaf.
    ///
    /// # Errors
    /// Returns an error if any index query fails.
    pub fn build(&self, root: &Symbol, direction: Direction) -> Result<CallHierarchy, GraphError> {
        let mut seen = SeenSet::new();
        seen.insert(root);
        let children = self.expand(root, direction, &mut seen)?;
        debug!(
            target: BUILDER_TARGET,
            root = root.name(),
            %direction,
            expanded = seen.len(),
            "built call hierarchy"
        );
        Ok(CallHierarchy {
            root: root.clone(),
            direction,
            children,
        })
    }

    /// Returns the sorted callers of `symbol`, expanding unseen ones.
    ///
    /// # Errors
    /// Returns an error if any index query fails.
    pub fn build_callers(
        &self,
        symbol: &Symbol,
        seen: &mut SeenSet,
    ) -> Result<Vec<CallEdgeNode>, GraphError> {
        let Some(binding) = self.index.binding_of(symbol)? else {
            trace!(target: BUILDER_TARGET, symbol = %symbol.id(), "no binding");
            return Ok(Vec::new());
        };

        let mut candidates = self.index.find_references(&binding, true)?;
        if binding.kind().can_override() {
            for overridden in self.overrides.overridden(self.index, &binding)? {
                let polymorphic = self
                    .index
                    .find_references(&overridden, true)?
                    .into_iter()
                    .filter(NameOccurrence::is_polymorphic);
                candidates.extend(polymorphic);
            }
        }

        let mut nodes = Vec::with_capacity(candidates.len());
        for reference in candidates {
            let Some(definition) = self.index.enclosing_definition(&reference)? else {
                continue;
            };
            let Some(caller) = self.index.symbol_for_occurrence(&definition)? else {
                continue;
            };
            nodes.push(CallEdgeNode::new(caller, reference));
        }

        self.expand_unseen(nodes, Direction::Callers, seen)
    }

    /// Returns the sorted callees of `symbol`, expanding unseen ones.
    ///
    /// # Errors
    /// Returns an error if any index query fails.
    pub fn build_callees(
        &self,
        symbol: &Symbol,
        seen: &mut SeenSet,
    ) -> Result<Vec<CallEdgeNode>, GraphError> {
        let Some(definition) = self.index.definition_of(symbol)? else {
            trace!(target: BUILDER_TARGET, symbol = %symbol.id(), "no definition");
            return Ok(Vec::new());
        };

        let mut nodes = Vec::new();
        for enclosed in self.index.enclosed_occurrences(&definition)? {
            let Some(binding) = self.index.binding_for_occurrence(&enclosed)? else {
                continue;
            };
            let Some(target) = self.index.definitions_of(&binding)?.into_iter().next() else {
                continue;
            };
            let Some(callee) = self.index.symbol_for_occurrence(&target)? else {
                continue;
            };
            if callee.kind().is_callable() {
                nodes.push(CallEdgeNode::new(callee, enclosed));
            }
        }

        self.expand_unseen(nodes, Direction::Callees, seen)
    }

    fn expand(
        &self,
        symbol: &Symbol,
        direction: Direction,
        seen: &mut SeenSet,
    ) -> Result<Vec<CallEdgeNode>, GraphError> {
        match direction {
            Direction::Callers => self.build_callers(symbol, seen),
            Direction::Callees => self.build_callees(symbol, seen),
        }
    }

    fn expand_unseen(
        &self,
        mut nodes: Vec<CallEdgeNode>,
        direction: Direction,
        seen: &mut SeenSet,
    ) -> Result<Vec<CallEdgeNode>, GraphError> {
        sort_siblings(&mut nodes);
        for node in &mut nodes {
            if !seen.insert(node.symbol()) {
                continue;
            }
            trace!(
                target: BUILDER_TARGET,
                symbol = node.symbol().name(),
                %direction,
                "expanding"
            );
            let children = self.expand(node.symbol(), direction, seen)?;
            node.expand(children);
        }
        Ok(nodes)
    }
}
