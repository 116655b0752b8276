//! The backend-agnostic instruction stream produced by IR generation.
//!
//! Instructions are emitted in execution order; this crate never reorders
//! them. Both the managed-runtime and the native backend consume this
//! vocabulary, lowering declarative blocks (logical AND/OR) eagerly or
//! lazily as they see fit.

pub mod call;
pub mod display;
pub mod instr;
pub mod validate;

pub use call::{CallDetails, CallMetadata};
pub use display::render;
pub use instr::{Instr, IrOp, LogicalBlock, LogicalOp};
pub use validate::check_scope_balance;
