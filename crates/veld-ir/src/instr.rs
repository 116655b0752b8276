//! IR instructions.

use serde::{Deserialize, Serialize};
use veld_core::DebugInfo;

use crate::call::CallDetails;

/// One instruction in the generated stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instr {
    pub op: IrOp,
    /// The variable receiving this instruction's result, if it produces one.
    pub result: Option<String>,
    /// Present only when debug instrumentation is enabled.
    pub debug: Option<DebugInfo>,
}

impl Instr {
    pub fn new(op: IrOp) -> Self {
        Self {
            op,
            result: None,
            debug: None,
        }
    }

    pub fn with_result(op: IrOp, result: impl Into<String>) -> Self {
        Self {
            op,
            result: Some(result.into()),
            debug: None,
        }
    }

    pub fn with_debug(mut self, debug: Option<DebugInfo>) -> Self {
        self.debug = debug;
        self
    }
}

/// The open, tagged set of operation kinds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrOp {
    /// Method, constructor, or function call.
    Call(CallDetails),
    /// Operator invocation (`+`, `<`, `_and`, ...).
    OperatorCall(CallDetails),
    /// Load a literal of a named type.
    LiteralLoad { value: String, type_name: String },
    /// Reference-count increment. Harmless on a garbage-collected backend.
    Retain { var: String },
    /// Register a value with a scope for release when the scope exits.
    ScopeRegister { var: String, scope_id: String },
    ScopeEnter { scope_id: String },
    ScopeExit { scope_id: String },
    /// Store `src` into `dest` (e.g. writing a stepped loop counter back).
    Store { dest: String, src: String },
    /// Declarative short-circuit AND/OR block.
    LogicalBlock(LogicalBlock),
}

/// Which boolean connective a logical block computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// The boxed-boolean operator method the result computation invokes.
    pub fn method_name(self) -> &'static str {
        match self {
            LogicalOp::And => "_and",
            LogicalOp::Or => "_or",
        }
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalOp::And => write!(f, "and"),
            LogicalOp::Or => write!(f, "or"),
        }
    }
}

/// The payload of a short-circuit AND/OR block.
///
/// Backends choose at lowering time whether to short-circuit on
/// `condition_var` or to evaluate both operands eagerly; the block carries
/// everything needed for either strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalBlock {
    pub op: LogicalOp,
    /// Left-operand evaluation; always non-empty (at minimum the primitive
    /// condition extraction).
    pub lhs: Vec<Instr>,
    /// Primitive-boolean condition produced by `lhs`.
    pub condition_var: String,
    /// Right-operand evaluation, run only on the non-short-circuit path.
    pub rhs: Vec<Instr>,
    /// Result computation: the boxed `_and`/`_or` call plus its memory
    /// bookkeeping.
    pub result: Vec<Instr>,
}
