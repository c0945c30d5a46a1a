//! Request-scoped record of expanded symbols.

use std::collections::HashSet;

use crate::symbol::{Symbol, SymbolId};

/// Symbols already expanded during one traversal.
///
/// A symbol is expanded at most once per request; the builder turns every
/// later occurrence into a leaf. This is what makes recursive and mutually
/// recursive call graphs terminate.
#[derive(Debug, Default)]
pub struct SeenSet {
    ids: HashSet<SymbolId>,
}

impl SeenSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `symbol`, returning `true` if it was not yet present.
    pub fn insert(&mut self, symbol: &Symbol) -> bool {
        self.ids.insert(symbol.id())
    }

    /// Returns `true` if `symbol` has been recorded.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.ids.contains(&symbol.id())
    }

    /// Returns the number of recorded symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
