//! Side-effect vocabulary shared between the symbol table and the IR.

use serde::{Deserialize, Serialize};

/// A side effect a callable is known to have.
///
/// Recorded on callable symbols by semantic analysis and embedded in call
/// metadata so backends can order and schedule calls safely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SideEffect {
    /// The call mutates its target (e.g. `++`, compound assignment).
    TargetMutation,
    /// The call mutates the value it returns.
    ReturnMutation,
    /// The call performs input/output.
    Io,
}

impl std::fmt::Display for SideEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideEffect::TargetMutation => write!(f, "TARGET_MUTATION"),
            SideEffect::ReturnMutation => write!(f, "RETURN_MUTATION"),
            SideEffect::Io => write!(f, "IO"),
        }
    }
}
