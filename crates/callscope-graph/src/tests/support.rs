//! Shared helpers for assembling snapshot indexes in tests.

use camino::Utf8Path;

use crate::{
    BindingId, BindingRecord, CallEdgeNode, CallHierarchy, Direction, HierarchyBuilder,
    IndexSnapshot, NameRecord, NameRole, OccurrenceId, SnapshotIndex, Symbol, SymbolIndex,
    SymbolKind,
};

/// Fluent builder for [`IndexSnapshot`] fixtures.
#[derive(Debug, Default, Clone)]
pub(crate) struct SnapshotFixture {
    snapshot: IndexSnapshot,
}

impl SnapshotFixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn function(self, id: u64, name: &str) -> Self {
        self.binding(id, name, SymbolKind::Function)
    }

    pub(crate) fn binding(mut self, id: u64, name: &str, kind: SymbolKind) -> Self {
        self.snapshot.bindings.push(BindingRecord {
            id: BindingId::new(id),
            name: name.to_owned(),
            parameters: Vec::new(),
            kind,
            language: None,
            overrides: Vec::new(),
        });
        self
    }

    pub(crate) fn parameters(mut self, id: u64, parameters: &[&str]) -> Self {
        if let Some(record) = self.binding_mut(id) {
            record.parameters = parameters.iter().map(|&value| value.to_owned()).collect();
        }
        self
    }

    pub(crate) fn overrides(mut self, id: u64, ancestor: u64) -> Self {
        if let Some(record) = self.binding_mut(id) {
            record.overrides.push(BindingId::new(ancestor));
        }
        self
    }

    pub(crate) fn definition(self, id: u64, binding: u64, resource: &str, offset: u32) -> Self {
        self.name(id, binding, resource, offset, NameRole::Definition, None, false)
    }

    pub(crate) fn call(
        self,
        id: u64,
        binding: u64,
        resource: &str,
        offset: u32,
        enclosing: u64,
    ) -> Self {
        self.name(
            id,
            binding,
            resource,
            offset,
            NameRole::Reference,
            Some(enclosing),
            false,
        )
    }

    pub(crate) fn polymorphic_call(
        self,
        id: u64,
        binding: u64,
        resource: &str,
        offset: u32,
        enclosing: u64,
    ) -> Self {
        self.name(
            id,
            binding,
            resource,
            offset,
            NameRole::Reference,
            Some(enclosing),
            true,
        )
    }

    pub(crate) fn top_level_reference(
        self,
        id: u64,
        binding: u64,
        resource: &str,
        offset: u32,
    ) -> Self {
        self.name(id, binding, resource, offset, NameRole::Reference, None, false)
    }

    #[expect(
        clippy::too_many_arguments,
        reason = "mirrors the NameRecord fields one to one"
    )]
    fn name(
        mut self,
        id: u64,
        binding: u64,
        resource: &str,
        offset: u32,
        role: NameRole,
        enclosing: Option<u64>,
        polymorphic: bool,
    ) -> Self {
        self.snapshot.names.push(NameRecord {
            id: OccurrenceId::new(id),
            binding: BindingId::new(binding),
            resource: resource.into(),
            offset,
            length: 3,
            role,
            polymorphic,
            enclosing: enclosing.map(OccurrenceId::new),
            language: None,
        });
        self
    }

    /// Reverses the name records, leaving the graph itself unchanged.
    pub(crate) fn reversed(mut self) -> Self {
        self.snapshot.names.reverse();
        self.snapshot.bindings.reverse();
        self
    }

    pub(crate) fn snapshot(&self) -> IndexSnapshot {
        self.snapshot.clone()
    }

    pub(crate) fn index(self) -> SnapshotIndex {
        SnapshotIndex::from_snapshot(self.snapshot).expect("fixture snapshot should validate")
    }

    fn binding_mut(&mut self, id: u64) -> Option<&mut BindingRecord> {
        self.snapshot
            .bindings
            .iter_mut()
            .find(|record| record.id == BindingId::new(id))
    }
}

/// Callers of `f` from two files, listed out of order:
/// `A:bar` calls at offset 10, `A:baz` at offset 5 and `B:qux` at offset 20.
pub(crate) fn two_file_callers() -> SnapshotFixture {
    SnapshotFixture::new()
        .function(1, "f")
        .function(2, "bar")
        .function(3, "baz")
        .function(4, "qux")
        .definition(10, 1, "F", 0)
        .definition(20, 2, "A", 8)
        .definition(30, 3, "A", 1)
        .definition(40, 4, "B", 18)
        .call(43, 1, "B", 20, 40)
        .call(33, 1, "A", 5, 30)
        .call(23, 1, "A", 10, 20)
}

/// Resolves the symbol named at `offset` in `resource`.
pub(crate) fn symbol(index: &SnapshotIndex, resource: &str, offset: u32) -> Symbol {
    index
        .symbol_at(Utf8Path::new(resource), offset, 0)
        .expect("symbol lookup should succeed")
        .expect("symbol should resolve")
}

pub(crate) fn build(index: &SnapshotIndex, root: &Symbol, direction: Direction) -> CallHierarchy {
    HierarchyBuilder::new(index)
        .build(root, direction)
        .expect("hierarchy should build")
}

/// Flattens a hierarchy into `name` strings, indenting one space per level
/// and marking leaves with a trailing `*`.
pub(crate) fn outline(hierarchy: &CallHierarchy) -> Vec<String> {
    let mut lines = vec![hierarchy.root().name().to_owned()];
    for child in hierarchy.children() {
        push_outline(child, 1, &mut lines);
    }
    lines
}

fn push_outline(node: &CallEdgeNode, depth: usize, lines: &mut Vec<String>) {
    let marker = if node.is_expanded() { "" } else { "*" };
    lines.push(format!(
        "{}{}{marker}",
        " ".repeat(depth),
        node.symbol().name()
    ));
    for child in node.children().unwrap_or_default() {
        push_outline(child, depth + 1, lines);
    }
}
