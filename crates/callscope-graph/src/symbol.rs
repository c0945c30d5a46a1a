//! Program symbols and their source locations.

use std::hash::{Hash, Hasher};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Stable identity of a symbol within one index snapshot.
///
/// Overloads share a name, so identity rather than name is what the seen-set
/// and every map keyed by symbol use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(u64);

impl SymbolId {
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

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of program element a symbol or binding denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// A free function.
    Function,
    /// A member function; the only kind that can override another.
    Method,
    /// A constructor.
    Constructor,
    /// A variable.
    Variable,
    /// A data member.
    Field,
    /// A type, class, or enumeration.
    Type,
    /// A jump label or macro.
    Label,
    /// Anything the index could not classify.
    Other,
}

impl SymbolKind {
    /// Returns `true` for kinds that can appear in a call hierarchy.
    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Constructor)
    }

    /// Returns `true` for kinds that can override an ancestor declaration.
    #[must_use]
    pub const fn can_override(self) -> bool {
        matches!(self, Self::Method)
    }
}

/// A resource path and byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    resource: Utf8PathBuf,
    offset: u32,
}

impl SourceLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(resource: impl Into<Utf8PathBuf>, offset: u32) -> Self {
        Self {
            resource: resource.into(),
            offset,
        }
    }

    /// Returns the resource path.
    #[must_use]
    pub fn resource(&self) -> &Utf8Path {
        &self.resource
    }

    /// Returns the byte offset within the resource.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

/// A resolved, callable program element.
///
/// Equality and hashing consider only [`SymbolId`].
#[derive(Debug, Clone)]
pub struct Symbol {
    id: SymbolId,
    name: String,
    parameter_types: Vec<String>,
    kind: SymbolKind,
    location: SourceLocation,
}

impl Symbol {
    /// Creates a symbol without parameters.
    #[must_use]
    pub fn new(
        id: SymbolId,
        name: impl Into<String>,
        kind: SymbolKind,
        location: SourceLocation,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parameter_types: Vec::new(),
            kind,
            location,
        }
    }

    /// Sets the ordered parameter type names.
    #[must_use]
    pub fn with_parameters<I, S>(mut self, parameter_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_types = parameter_types.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the stable identity.
    #[must_use]
    pub const fn id(&self) -> SymbolId {
        self.id
    }

    /// Returns the qualified display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parameter type names in declaration order.
    #[must_use]
    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// Returns the symbol kind.
    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the definition location.
    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Returns `<name>(<type>, <type>, ...)`.
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameter_types.join(", "))
    }

    /// Returns the text compared by the hierarchy ordering rule: the
    /// resource path immediately followed by the display name.
    #[must_use]
    pub fn ordering_key(&self) -> String {
        format!("{}{}", self.location.resource, self.name)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
