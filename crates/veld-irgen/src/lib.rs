//! IR generation for Veld
//!
//! This crate lowers resolved Veld programs into the backend-agnostic
//! instruction stream defined by `veld-ir`: it resolves call sites against
//! the symbol table (with single-step type promotion), inserts explicit
//! retain and scope-register bookkeeping, and assembles structured
//! control-flow blocks such as short-circuit AND/OR and bidirectional
//! range-loop plumbing.

pub mod blocks;
pub mod call_context;
pub mod calls;
pub mod context;
pub mod errors;
pub mod frames;
pub mod invoke;
pub mod memory;
pub mod names;
pub mod resolve;
pub mod value;

pub use blocks::{ASCENDING, DESCENDING, DirectionConfig, LoweredOperand};
pub use call_context::{CallContext, CallShape};
pub use calls::{EvalContext, ExprLowerer};
pub use context::IrGenCtx;
pub use errors::{IrGenError, IrGenErrorKind, IrGenResult};
pub use frames::{AggregateKind, FrameKind, ScopeFrame, ScopeStack};
pub use invoke::ComparisonSpec;
pub use memory::VariableDetails;
pub use names::NameGenerator;
pub use resolve::{EXACT_MATCH, NO_MATCH, PROMOTION_COST, ResolvedCall, ResolvedVia};
pub use value::TypedVar;
