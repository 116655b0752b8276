//! Compiler flags visible to the IR generation phase.

use serde::{Deserialize, Serialize};

/// Flags handed down from the build driver.
///
/// IR generation only reads these; it never mutates them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerFlags {
    /// When set, every generated instruction carries source-location
    /// metadata for the backend's debug tables.
    pub debug_instrumentation: bool,
}

impl CompilerFlags {
    pub fn with_debug_instrumentation() -> Self {
        Self {
            debug_instrumentation: true,
        }
    }
}
