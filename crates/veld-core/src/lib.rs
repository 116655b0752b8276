//! Veld compiler utilities shared across compilation phases.

pub mod debug;
pub mod effects;
pub mod flags;
pub mod span;

pub use debug::DebugInfo;
pub use effects::SideEffect;
pub use flags::CompilerFlags;
pub use span::{SourceRef, Span};
