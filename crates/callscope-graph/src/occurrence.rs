//! Textual references to bindings.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Identity of a name occurrence within one index snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(u64);

impl OccurrenceId {
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

/// One textual reference to a binding at a byte offset.
///
/// The resource is optional: an index may know the offset of a name without
/// being able to map its file back to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOccurrence {
    id: OccurrenceId,
    resource: Option<Utf8PathBuf>,
    offset: u32,
    length: u32,
    polymorphic: bool,
}

impl NameOccurrence {
    /// Creates an occurrence with no resource, zero length, and no
    /// polymorphic flag.
    #[must_use]
    pub const fn new(id: OccurrenceId, offset: u32) -> Self {
        Self {
            id,
            resource: None,
            offset,
            length: 0,
            polymorphic: false,
        }
    }

    /// Sets the enclosing resource.
    #[must_use]
    pub fn in_resource(mut self, resource: impl Into<Utf8PathBuf>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets the length of the name in bytes.
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Marks the occurrence as a site that may dispatch to an override.
    #[must_use]
    pub const fn polymorphic(mut self, polymorphic: bool) -> Self {
        self.polymorphic = polymorphic;
        self
    }

    /// Returns the occurrence identity.
    #[must_use]
    pub const fn id(&self) -> OccurrenceId {
        self.id
    }

    /// Returns the resource containing the occurrence, if known.
    #[must_use]
    pub fn resource(&self) -> Option<&Utf8Path> {
        self.resource.as_deref()
    }

    /// Returns the byte offset of the name.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Returns the length of the name in bytes.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Returns `true` when the index flagged this as a polymorphic call site.
    #[must_use]
    pub const fn is_polymorphic(&self) -> bool {
        self.polymorphic
    }
}
