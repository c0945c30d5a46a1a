//! Read-only query surface over a cross-reference database.
//!
//! The hierarchy builder never mutates the index and never locks it; callers
//! hold a read guard from [`SharedIndex`](crate::SharedIndex) for the whole
//! traversal so every query observes the same snapshot.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::occurrence::{NameOccurrence, OccurrenceId};
use crate::symbol::{Symbol, SymbolKind};

/// Identity of an index binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(u64);

impl BindingId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The index's handle for a symbol, used to query references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    id: BindingId,
    kind: SymbolKind,
}

impl Binding {
    /// Creates a binding handle.
    #[must_use]
    pub const fn new(id: BindingId, kind: SymbolKind) -> Self {
        Self { id, kind }
    }

    /// Returns the binding identity.
    #[must_use]
    pub const fn id(&self) -> BindingId {
        self.id
    }

    /// Returns the kind of element the binding denotes.
    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }
}

/// Shape of the override lookup an index exposes.
///
/// Some index implementations answer "which methods does this method
/// override" directly, others need an optional lookup point to resolve
/// dependent names. The hierarchy builder negotiates the shape once through
/// [`OverrideResolver`](crate::OverrideResolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideLookupShape {
    /// [`SymbolIndex::overridden_bindings`] answers the query.
    Direct,
    /// [`SymbolIndex::overridden_bindings_at`] answers the query.
    Contextual,
    /// The index cannot report overrides.
    Unavailable,
}

impl std::fmt::Display for OverrideLookupShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Direct => "direct",
            Self::Contextual => "contextual",
            Self::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

/// Queries the hierarchy builder issues against a cross-reference database.
///
/// Every query may fail with a [`GraphError`], which the builder propagates
/// unchanged. "Nothing found" is expressed with `None` or an empty vector.
pub trait SymbolIndex {
    /// Resolves a symbol to its binding.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn binding_of(&self, symbol: &Symbol) -> Result<Option<Binding>, GraphError>;

    /// Returns every reference to a binding.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn find_references(
        &self,
        binding: &Binding,
        across_language_boundaries: bool,
    ) -> Result<Vec<NameOccurrence>, GraphError>;

    /// Returns the definition that lexically contains a reference.
    ///
    /// References at file or namespace scope have none.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn enclosing_definition(
        &self,
        occurrence: &NameOccurrence,
    ) -> Result<Option<NameOccurrence>, GraphError>;

    /// Maps an occurrence to the symbol of the binding it names.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn symbol_for_occurrence(
        &self,
        occurrence: &NameOccurrence,
    ) -> Result<Option<Symbol>, GraphError>;

    /// Returns the references lexically inside a definition's body.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn enclosed_occurrences(
        &self,
        definition: &NameOccurrence,
    ) -> Result<Vec<NameOccurrence>, GraphError>;

    /// Returns the definitions of a binding.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn definitions_of(&self, binding: &Binding) -> Result<Vec<NameOccurrence>, GraphError>;

    /// Resolves the binding an occurrence names.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn binding_for_occurrence(
        &self,
        occurrence: &NameOccurrence,
    ) -> Result<Option<Binding>, GraphError>;

    /// Returns the definition occurrence of a symbol.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn definition_of(&self, symbol: &Symbol) -> Result<Option<NameOccurrence>, GraphError>;

    /// Resolves a text selection to the symbol it names.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn symbol_at(
        &self,
        resource: &Utf8Path,
        offset: u32,
        length: u32,
    ) -> Result<Option<Symbol>, GraphError>;

    /// Reports which override lookup this index answers.
    fn override_lookup_shape(&self) -> OverrideLookupShape {
        OverrideLookupShape::Unavailable
    }

    /// Returns the ancestor methods a method overrides.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn overridden_bindings(&self, _binding: &Binding) -> Result<Vec<Binding>, GraphError> {
        Ok(Vec::new())
    }

    /// Returns the ancestor methods a method overrides, resolved at an
    /// optional lookup point.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    fn overridden_bindings_at(
        &self,
        _binding: &Binding,
        _point: Option<OccurrenceId>,
    ) -> Result<Vec<Binding>, GraphError> {
        Ok(Vec::new())
    }
}
