//! Override lookup negotiation.

use tracing::debug;

use crate::error::GraphError;
use crate::index::{Binding, OverrideLookupShape, SymbolIndex};

/// Tracing target for capability negotiation.
const CAPABILITY_TARGET: &str = "callscope_graph::capability";

/// Override lookup selected once per builder.
///
/// The shape reported by the index is read when the resolver is created and
/// never re-probed during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideResolver {
    shape: OverrideLookupShape,
}

impl OverrideResolver {
    /// Negotiates the override lookup exposed by `index`.
    #[must_use]
    pub fn negotiate<I: SymbolIndex + ?Sized>(index: &I) -> Self {
        let shape = index.override_lookup_shape();
        debug!(
            target: CAPABILITY_TARGET,
            %shape,
            "negotiated override lookup"
        );
        Self { shape }
    }

    /// Returns the negotiated shape.
    #[must_use]
    pub const fn shape(self) -> OverrideLookupShape {
        self.shape
    }

    /// Returns the bindings `binding` overrides through the negotiated shape.
    ///
    /// # Errors
    /// Returns an error if the index query fails.
    pub fn overridden<I: SymbolIndex + ?Sized>(
        self,
        index: &I,
        binding: &Binding,
    ) -> Result<Vec<Binding>, GraphError> {
        match self.shape {
            OverrideLookupShape::Direct => index.overridden_bindings(binding),
            OverrideLookupShape::Contextual => index.overridden_bindings_at(binding, None),
            OverrideLookupShape::Unavailable => Ok(Vec::new()),
        }
    }
}
