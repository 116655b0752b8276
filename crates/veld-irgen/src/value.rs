//! Lowered values flowing between generation steps.

use veld_sem::TypeId;

/// A lowered value: the variable holding it and its resolved type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedVar {
    pub var: String,
    pub type_id: TypeId,
}

impl TypedVar {
    pub fn new(var: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            var: var.into(),
            type_id,
        }
    }
}
