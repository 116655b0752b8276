//! Debug metadata attached to generated instructions.

use serde::{Deserialize, Serialize};

use crate::span::SourceRef;

/// Source-file/line/column metadata carried by an instruction.
///
/// Present on generated instructions only when the debug-instrumentation
/// compiler flag is set; backends translate it into their own debug tables.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebugInfo {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl DebugInfo {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl From<&SourceRef> for DebugInfo {
    fn from(src: &SourceRef) -> Self {
        Self {
            file: src.file.clone(),
            line: src.line,
            column: src.column,
        }
    }
}

impl std::fmt::Display for DebugInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
