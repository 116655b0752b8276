//! Type definitions in the resolved-program snapshot.

use serde::{Deserialize, Serialize};

use crate::ids::{SymbolId, TypeId};

/// A resolved type, as recorded by semantic analysis.
///
/// Generic parameterization happens before this snapshot is built, so every
/// type here is concrete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    /// Single-inheritance super type, if any.
    pub super_type: Option<TypeId>,
    /// Callables declared directly on this type, in declaration order.
    pub methods: Vec<SymbolId>,
    /// The designated zero-argument promotion operator, if the type
    /// declares one.
    pub promotion: Option<SymbolId>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_type: None,
            methods: Vec::new(),
            promotion: None,
        }
    }
}
