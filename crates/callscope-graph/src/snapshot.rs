//! In-memory index loaded from a JSON cross-reference snapshot.
//!
//! A snapshot lists bindings and the names that refer to them:
//!
//! ```json
//! {
//!   "bindings": [
//!     { "id": 1, "name": "Shape::area", "kind": "method", "overrides": [7] }
//!   ],
//!   "names": [
//!     { "id": 10, "binding": 1, "resource": "/src/shape.cpp", "offset": 120,
//!       "length": 4, "role": "definition" },
//!     { "id": 11, "binding": 1, "resource": "/src/main.cpp", "offset": 48,
//!       "length": 4, "role": "reference", "polymorphic": true, "enclosing": 3 }
//!   ]
//! }
//! ```
//!
//! `enclosing` names the definition whose body contains a reference. Record
//! order is preserved, so queries return names in file order rather than in
//! identifier order.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GraphError;
use crate::index::{Binding, BindingId, OverrideLookupShape, SymbolIndex};
use crate::occurrence::{NameOccurrence, OccurrenceId};
use crate::symbol::{SourceLocation, Symbol, SymbolId, SymbolKind};

/// Tracing target for snapshot loading.
const SNAPSHOT_TARGET: &str = "callscope_graph::snapshot";

/// Serialised form of a cross-reference database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexSnapshot {
    /// Program elements known to the index.
    #[serde(default)]
    pub bindings: Vec<BindingRecord>,
    /// Every recorded name of those elements.
    #[serde(default)]
    pub names: Vec<NameRecord>,
}

/// One binding in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BindingRecord {
    /// Binding identity; also used as the symbol identity.
    pub id: BindingId,
    /// Qualified display name.
    pub name: String,
    /// Parameter type names in declaration order.
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Element kind.
    pub kind: SymbolKind,
    /// Source language, when the index spans several.
    #[serde(default)]
    pub language: Option<String>,
    /// Ancestor methods this binding directly overrides.
    #[serde(default)]
    pub overrides: Vec<BindingId>,
}

/// Role a name plays for its binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameRole {
    /// The defining occurrence.
    Definition,
    /// A declaration without a body.
    Declaration,
    /// A use of the binding.
    Reference,
}

/// One name in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NameRecord {
    /// Occurrence identity.
    pub id: OccurrenceId,
    /// Binding the name refers to.
    pub binding: BindingId,
    /// File containing the name.
    pub resource: Utf8PathBuf,
    /// Byte offset of the name.
    pub offset: u32,
    /// Length of the name in bytes.
    #[serde(default)]
    pub length: u32,
    /// Role of the name.
    pub role: NameRole,
    /// Whether the index considers this a polymorphic call site.
    #[serde(default)]
    pub polymorphic: bool,
    /// Definition whose body lexically contains this name.
    #[serde(default)]
    pub enclosing: Option<OccurrenceId>,
    /// Source language of the containing file.
    #[serde(default)]
    pub language: Option<String>,
}

impl NameRecord {
    fn to_occurrence(&self) -> NameOccurrence {
        NameOccurrence::new(self.id, self.offset)
            .in_resource(self.resource.clone())
            .with_length(self.length)
            .polymorphic(self.polymorphic)
    }

    fn covers(&self, resource: &Utf8Path, offset: u32, length: u32) -> bool {
        self.resource.as_path() == resource
            && self.offset <= offset
            && offset.saturating_add(length) <= self.offset.saturating_add(self.length)
    }
}

/// A [`SymbolIndex`] answering queries from an [`IndexSnapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotIndex {
    bindings: HashMap<BindingId, BindingRecord>,
    names: Vec<NameRecord>,
    name_positions: HashMap<OccurrenceId, usize>,
    names_by_binding: HashMap<BindingId, Vec<usize>>,
    enclosed: HashMap<OccurrenceId, Vec<usize>>,
    shape: OverrideLookupShape,
}

impl SnapshotIndex {
    /// Reads and validates a snapshot file.
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] if the file cannot be read and
    /// [`GraphError::Snapshot`] if it is malformed.
    pub fn load(path: &Utf8Path) -> Result<Self, GraphError> {
        let text = fs::read_to_string(path).map_err(|err| GraphError::io(path, err))?;
        let index = Self::from_json(&text)?;
        debug!(
            target: SNAPSHOT_TARGET,
            path = %path,
            bindings = index.bindings.len(),
            names = index.names.len(),
            "loaded index snapshot"
        );
        Ok(index)
    }

    /// Parses and validates a snapshot document.
    ///
    /// # Errors
    /// Returns [`GraphError::Snapshot`] if the document is malformed.
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        let snapshot: IndexSnapshot =
            serde_json::from_str(text).map_err(GraphError::snapshot_parse)?;
        Self::from_snapshot(snapshot)
    }

    /// Validates a snapshot and builds the lookup tables.
    ///
    /// # Errors
    /// Returns [`GraphError::Snapshot`] on duplicate identities or on records
    /// that refer to missing bindings or names.
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self, GraphError> {
        let mut bindings = HashMap::with_capacity(snapshot.bindings.len());
        for record in snapshot.bindings {
            let id = record.id;
            if bindings.insert(id, record).is_some() {
                return Err(GraphError::snapshot(format!(
                    "duplicate binding id {}",
                    id.get()
                )));
            }
        }

        let names = snapshot.names;
        let mut name_positions = HashMap::with_capacity(names.len());
        let mut names_by_binding: HashMap<BindingId, Vec<usize>> = HashMap::new();
        for (position, record) in names.iter().enumerate() {
            if name_positions.insert(record.id, position).is_some() {
                return Err(GraphError::snapshot(format!(
                    "duplicate name id {}",
                    record.id.get()
                )));
            }
            if !bindings.contains_key(&record.binding) {
                return Err(GraphError::snapshot(format!(
                    "name {} refers to unknown binding {}",
                    record.id.get(),
                    record.binding.get()
                )));
            }
            names_by_binding
                .entry(record.binding)
                .or_default()
                .push(position);
        }

        let mut enclosed: HashMap<OccurrenceId, Vec<usize>> = HashMap::new();
        for (position, record) in names.iter().enumerate() {
            let Some(enclosing) = record.enclosing else {
                continue;
            };
            let is_definition = name_positions
                .get(&enclosing)
                .and_then(|&index| names.get(index))
                .is_some_and(|parent| parent.role == NameRole::Definition);
            if !is_definition {
                return Err(GraphError::snapshot(format!(
                    "name {} is enclosed by {}, which is not a definition",
                    record.id.get(),
                    enclosing.get()
                )));
            }
            enclosed.entry(enclosing).or_default().push(position);
        }

        for record in bindings.values() {
            if let Some(missing) = record
                .overrides
                .iter()
                .find(|ancestor| !bindings.contains_key(ancestor))
            {
                return Err(GraphError::snapshot(format!(
                    "binding {} overrides unknown binding {}",
                    record.id.get(),
                    missing.get()
                )));
            }
        }

        Ok(Self {
            bindings,
            names,
            name_positions,
            names_by_binding,
            enclosed,
            shape: OverrideLookupShape::Direct,
        })
    }

    /// Changes the override lookup shape this index advertises.
    #[must_use]
    pub const fn with_override_shape(mut self, shape: OverrideLookupShape) -> Self {
        self.shape = shape;
        self
    }

    fn record(&self, id: OccurrenceId) -> Option<&NameRecord> {
        self.name_positions
            .get(&id)
            .and_then(|&position| self.names.get(position))
    }

    fn names_of(&self, binding: BindingId) -> impl Iterator<Item = &NameRecord> {
        self.names_by_binding
            .get(&binding)
            .into_iter()
            .flatten()
            .filter_map(|&position| self.names.get(position))
    }

    fn binding_handle(&self, id: BindingId) -> Option<Binding> {
        self.bindings
            .get(&id)
            .map(|record| Binding::new(record.id, record.kind))
    }

    fn symbol_for_binding(&self, id: BindingId) -> Option<Symbol> {
        let record = self.bindings.get(&id)?;
        let anchor = self
            .names_of(id)
            .find(|name| name.role == NameRole::Definition)
            .or_else(|| {
                self.names_of(id)
                    .find(|name| name.role == NameRole::Declaration)
            })?;
        let symbol = Symbol::new(
            SymbolId::new(id.get()),
            record.name.clone(),
            record.kind,
            SourceLocation::new(anchor.resource.clone(), anchor.offset),
        )
        .with_parameters(record.parameters.iter().cloned());
        Some(symbol)
    }

    fn transitive_overrides(&self, start: BindingId) -> Vec<Binding> {
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut found = Vec::new();
        while let Some(current) = queue.pop_front() {
            let Some(record) = self.bindings.get(&current) else {
                continue;
            };
            for &ancestor in &record.overrides {
                if visited.insert(ancestor) {
                    if let Some(binding) = self.binding_handle(ancestor) {
                        found.push(binding);
                    }
                    queue.push_back(ancestor);
                }
            }
        }
        found
    }
}

impl SymbolIndex for SnapshotIndex {
    fn binding_of(&self, symbol: &Symbol) -> Result<Option<Binding>, GraphError> {
        Ok(self.binding_handle(BindingId::new(symbol.id().get())))
    }

    fn find_references(
        &self,
        binding: &Binding,
        across_language_boundaries: bool,
    ) -> Result<Vec<NameOccurrence>, GraphError> {
        let language = self
            .bindings
            .get(&binding.id())
            .and_then(|record| record.language.as_deref());
        Ok(self
            .names_of(binding.id())
            .filter(|name| name.role == NameRole::Reference)
            .filter(|name| across_language_boundaries || name.language.as_deref() == language)
            .map(NameRecord::to_occurrence)
            .collect())
    }

    fn enclosing_definition(
        &self,
        occurrence: &NameOccurrence,
    ) -> Result<Option<NameOccurrence>, GraphError> {
        Ok(self
            .record(occurrence.id())
            .and_then(|name| name.enclosing)
            .and_then(|enclosing| self.record(enclosing))
            .map(NameRecord::to_occurrence))
    }

    fn symbol_for_occurrence(
        &self,
        occurrence: &NameOccurrence,
    ) -> Result<Option<Symbol>, GraphError> {
        Ok(self
            .record(occurrence.id())
            .and_then(|name| self.symbol_for_binding(name.binding)))
    }

    fn enclosed_occurrences(
        &self,
        definition: &NameOccurrence,
    ) -> Result<Vec<NameOccurrence>, GraphError> {
        Ok(self
            .enclosed
            .get(&definition.id())
            .into_iter()
            .flatten()
            .filter_map(|&position| self.names.get(position))
            .filter(|name| name.role == NameRole::Reference)
            .map(NameRecord::to_occurrence)
            .collect())
    }

    fn definitions_of(&self, binding: &Binding) -> Result<Vec<NameOccurrence>, GraphError> {
        Ok(self
            .names_of(binding.id())
            .filter(|name| name.role == NameRole::Definition)
            .map(NameRecord::to_occurrence)
            .collect())
    }

    fn binding_for_occurrence(
        &self,
        occurrence: &NameOccurrence,
    ) -> Result<Option<Binding>, GraphError> {
        Ok(self
            .record(occurrence.id())
            .and_then(|name| self.binding_handle(name.binding)))
    }

    fn definition_of(&self, symbol: &Symbol) -> Result<Option<NameOccurrence>, GraphError> {
        Ok(self
            .names_of(BindingId::new(symbol.id().get()))
            .find(|name| name.role == NameRole::Definition)
            .map(NameRecord::to_occurrence))
    }

    fn symbol_at(
        &self,
        resource: &Utf8Path,
        offset: u32,
        length: u32,
    ) -> Result<Option<Symbol>, GraphError> {
        Ok(self
            .names
            .iter()
            .filter(|name| name.covers(resource, offset, length))
            .min_by_key(|name| name.length)
            .and_then(|name| self.symbol_for_binding(name.binding)))
    }

    fn override_lookup_shape(&self) -> OverrideLookupShape {
        self.shape
    }

    fn overridden_bindings(&self, binding: &Binding) -> Result<Vec<Binding>, GraphError> {
        Ok(self.transitive_overrides(binding.id()))
    }

    fn overridden_bindings_at(
        &self,
        binding: &Binding,
        _point: Option<OccurrenceId>,
    ) -> Result<Vec<Binding>, GraphError> {
        Ok(self.transitive_overrides(binding.id()))
    }
}
