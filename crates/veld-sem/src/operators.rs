//! The static operator table.
//!
//! Pure operator contexts without a parse-tree binding (synthesized
//! assignment operators, boolean plumbing inside generated blocks) resolve
//! against this table instead of the symbol table. Return type, purity and
//! side effects are derived structurally from the operator symbol.

use veld_core::SideEffect;

use crate::names;

/// How an operator's result type is derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorResult {
    /// Result has the same type as the operator's target.
    SameAsTarget,
    /// Result is a boxed `Boolean`.
    Boolean,
    /// Result is a primitive boolean; value-typed, never retained.
    PrimitiveBoolean,
    /// The operator produces no value.
    Void,
}

/// One entry of the static operator table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorEntry {
    pub symbol: &'static str,
    pub result: OperatorResult,
    pub pure: bool,
    pub side_effects: &'static [SideEffect],
}

const fn pure_op(symbol: &'static str, result: OperatorResult) -> OperatorEntry {
    OperatorEntry {
        symbol,
        result,
        pure: true,
        side_effects: &[],
    }
}

const fn mutating_op(symbol: &'static str, result: OperatorResult) -> OperatorEntry {
    OperatorEntry {
        symbol,
        result,
        pure: false,
        side_effects: &[SideEffect::TargetMutation],
    }
}

/// Look up an operator symbol in the static table.
///
/// Returns `None` for names that must resolve through the symbol table
/// (ordinary methods, constructors, `_call`, `_promote`).
pub fn operator_entry(symbol: &str) -> Option<OperatorEntry> {
    use OperatorResult::*;

    let entry = match symbol {
        // Arithmetic
        "+" => pure_op("+", SameAsTarget),
        "-" => pure_op("-", SameAsTarget),
        "*" => pure_op("*", SameAsTarget),
        "/" => pure_op("/", SameAsTarget),
        // Comparison
        "<" => pure_op("<", Boolean),
        "<=" => pure_op("<=", Boolean),
        ">" => pure_op(">", Boolean),
        ">=" => pure_op(">=", Boolean),
        "==" => pure_op("==", Boolean),
        "<>" => pure_op("<>", Boolean),
        // Boolean algebra on boxed booleans
        names::AND => pure_op(names::AND, Boolean),
        names::OR => pure_op(names::OR, Boolean),
        names::NOT => pure_op(names::NOT, Boolean),
        // Queries
        names::IS_SET => pure_op(names::IS_SET, Boolean),
        names::IS_TRUE => pure_op(names::IS_TRUE, PrimitiveBoolean),
        // Mutators returning the mutated target
        names::INCREMENT => mutating_op(names::INCREMENT, SameAsTarget),
        names::DECREMENT => mutating_op(names::DECREMENT, SameAsTarget),
        // Void-returning mutating forms
        "+=" => mutating_op("+=", Void),
        "-=" => mutating_op("-=", Void),
        "*=" => mutating_op("*=", Void),
        "/=" => mutating_op("/=", Void),
        ":=:" => mutating_op(":=:", Void),
        _ => return None,
    };
    Some(entry)
}
