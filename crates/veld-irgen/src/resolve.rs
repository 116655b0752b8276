//! The call resolution engine.
//!
//! Resolution is a three-branch decision, returned as a value rather than
//! driven by exceptions:
//!
//! 1. the call site carries a parse-tree binding whose callable was already
//!    resolved during semantic analysis — use it directly;
//! 2. otherwise, score the target type's candidates by assignability cost
//!    and pick the best;
//! 3. otherwise, fall back to the static operator table.
//!
//! A call that matches none of the branches is an internal compiler error:
//! semantic analysis must already have rejected it.

use veld_ir::{CallDetails, CallMetadata, Instr, IrOp};
use veld_sem::{
    CallableKind, CallableSymbol, OperatorEntry, OperatorResult, SymbolId, SymbolTable, TypeId,
    names, operator_entry,
};

use crate::call_context::CallContext;
use crate::context::IrGenCtx;
use crate::errors::{IrGenError, IrGenResult};
use crate::memory::{VariableDetails, append_retain_and_register_in};

/// Score of a parameter-for-parameter exact match.
pub const EXACT_MATCH: f64 = 100.0;

/// Cost added when an argument reaches its parameter through promotion.
pub const PROMOTION_COST: f64 = 0.5;

/// Floor of the score range; anything at or below is unresolvable.
pub const NO_MATCH: f64 = -1.0;

const SCORE_EPSILON: f64 = 1e-9;

/// A scored match from the cost-based search branch.
#[derive(Clone, Copy, Debug)]
pub struct MethodResolution {
    pub symbol: SymbolId,
    /// `100 − Σ` per-parameter assignability costs, clamped to
    /// `[-1.0, 100.0]`.
    pub score: f64,
    pub requires_promotion: bool,
}

/// Which branch resolved the call.
#[derive(Clone, Debug)]
pub enum ResolvedVia {
    /// Pre-resolved callable attached to the parse-tree node.
    Symbol(SymbolId),
    /// Best-scoring candidate from the target type's method set.
    Search(MethodResolution),
    /// Structural entry from the static operator table.
    OperatorTable(OperatorEntry),
}

/// The argument variables to pass after promotion, plus the instructions
/// computing and scope-registering any promoted temporaries.
#[derive(Debug, Default)]
pub struct Promotion {
    pub arg_vars: Vec<String>,
    pub instrs: Vec<Instr>,
}

/// A fully resolved call, ready to embed in the instruction stream.
#[derive(Debug)]
pub struct ResolvedCall {
    /// The resolved symbol, when resolution went through the symbol table.
    pub symbol: Option<SymbolId>,
    pub details: CallDetails,
    /// Promotion instructions to emit before the call itself.
    pub promotions: Vec<Instr>,
    /// Resolved return type; `None` for void or primitive results.
    pub return_type: Option<TypeId>,
}

/// Decide which branch resolves `call`.
pub fn resolve_callable(table: &SymbolTable, call: &CallContext) -> IrGenResult<ResolvedVia> {
    if let Some(node) = call.node {
        // A node binding means semantic analysis saw this call site; a
        // missing resolution here is a defect, not a reason to re-guess.
        return match table.resolved_callable(node) {
            Some(symbol) => Ok(ResolvedVia::Symbol(symbol)),
            None => Err(IrGenError::unresolved(
                &call.name,
                table.type_name(call.target_type),
            )),
        };
    }

    if let Some(resolution) = search_callable(table, call)? {
        return Ok(ResolvedVia::Search(resolution));
    }

    if let Some(entry) = operator_entry(&call.name) {
        tracing::debug!(operator = %call.name, "resolved via static operator table");
        return Ok(ResolvedVia::OperatorTable(entry));
    }

    Err(IrGenError::unresolved(
        &call.name,
        table.type_name(call.target_type),
    ))
}

/// Cost-based search over the target type's candidates.
///
/// Returns `Ok(None)` when no candidate is callable at all (the operator
/// table may still apply); two equally-best candidates are an error.
fn search_callable(
    table: &SymbolTable,
    call: &CallContext,
) -> IrGenResult<Option<MethodResolution>> {
    let mut best: Option<MethodResolution> = None;
    let mut tied = 0usize;

    for symbol in table.matching_callables(call.target_type, &call.name, call.arity()) {
        let Some((score, requires_promotion)) = score_candidate(table, call, symbol) else {
            continue;
        };
        if score <= NO_MATCH {
            continue;
        }
        let improves = match best.as_ref() {
            None => true,
            Some(current) if (score - current.score).abs() < SCORE_EPSILON => {
                tied += 1;
                false
            }
            Some(current) => score > current.score,
        };
        if improves {
            best = Some(MethodResolution {
                symbol,
                score,
                requires_promotion,
            });
            tied = 1;
        }
    }

    match best {
        None => Ok(None),
        Some(_) if tied > 1 => Err(IrGenError::ambiguous(
            &call.name,
            table.type_name(call.target_type),
            tied,
        )),
        Some(resolution) => {
            tracing::debug!(
                method = %call.name,
                score = resolution.score,
                promotion = resolution.requires_promotion,
                "resolved via cost-based search"
            );
            Ok(Some(resolution))
        }
    }
}

/// Score one candidate, or `None` when an argument can neither be passed
/// directly nor reach the parameter through a single promotion step.
fn score_candidate(
    table: &SymbolTable,
    call: &CallContext,
    symbol: SymbolId,
) -> Option<(f64, bool)> {
    let candidate = table.callable(symbol);
    let mut total_cost = 0.0;
    let mut requires_promotion = false;

    for (&arg, &param) in call.arg_types.iter().zip(&candidate.params) {
        let direct = table.assignability_cost(arg, param);
        if direct >= 0.0 {
            total_cost += direct;
            continue;
        }
        let promoted = table.promoted_type(arg)?;
        let after = table.assignability_cost(promoted, param);
        if after < 0.0 {
            return None;
        }
        total_cost += PROMOTION_COST + after;
        requires_promotion = true;
    }

    Some(((EXACT_MATCH - total_cost).max(NO_MATCH), requires_promotion))
}

/// Compute the promotion plan for `call` against declared `params`.
///
/// Each argument is promoted at most once: the promotion query is asked of
/// the raw argument type only, never of an already-promoted type.
pub fn plan_promotion(
    ctx: &mut IrGenCtx,
    call: &CallContext,
    params: &[TypeId],
) -> IrGenResult<Promotion> {
    let table = ctx.table;
    let mut promotion = Promotion {
        arg_vars: Vec::with_capacity(call.arg_vars.len()),
        instrs: Vec::new(),
    };

    for ((&arg_type, arg_var), &param) in call.arg_types.iter().zip(&call.arg_vars).zip(params) {
        if table.assignability_cost(arg_type, param) >= 0.0 {
            promotion.arg_vars.push(arg_var.clone());
            continue;
        }

        let impossible = || {
            IrGenError::promotion_impossible(
                arg_var,
                table.type_name(arg_type),
                table.type_name(param),
            )
        };
        let symbol = table.promotion_of(arg_type).ok_or_else(impossible)?;
        let promoted = table.promoted_type(arg_type).ok_or_else(impossible)?;
        if table.assignability_cost(promoted, param) < 0.0 {
            return Err(impossible());
        }

        tracing::debug!(
            arg = %arg_var,
            from = table.type_name(arg_type),
            to = table.type_name(promoted),
            "promoting argument"
        );
        let temp = ctx.names.temp_name();
        promotion.instrs.push(Instr::with_result(
            IrOp::OperatorCall(CallDetails {
                target_var: Some(arg_var.clone()),
                target_type: table.type_name(arg_type).to_owned(),
                method: names::PROMOTE.to_owned(),
                param_types: Vec::new(),
                return_type: table.type_name(promoted).to_owned(),
                args: Vec::new(),
                metadata: metadata_of(table.callable(symbol)),
            }),
            temp.clone(),
        ));
        // The promoted temporary is a heap value like any other result; it
        // belongs to the scope enclosing the call site.
        append_retain_and_register_in(
            &mut promotion.instrs,
            &VariableDetails::new(&temp, None),
            &call.scope_id,
        );
        promotion.arg_vars.push(temp);
    }

    Ok(promotion)
}

/// Resolve `call` into embeddable [`CallDetails`] plus any promotion
/// instructions.
pub fn resolve_call(ctx: &mut IrGenCtx, call: &CallContext) -> IrGenResult<ResolvedCall> {
    let table = ctx.table;
    match resolve_callable(table, call)? {
        ResolvedVia::Symbol(symbol) => build_symbol_call(ctx, call, symbol),
        ResolvedVia::Search(resolution) => build_symbol_call(ctx, call, resolution.symbol),
        ResolvedVia::OperatorTable(entry) => Ok(build_table_call(table, call, entry)),
    }
}

fn build_symbol_call(
    ctx: &mut IrGenCtx,
    call: &CallContext,
    symbol: SymbolId,
) -> IrGenResult<ResolvedCall> {
    let table = ctx.table;
    let callable = table.callable(symbol);
    if callable.params.len() != call.arity() {
        return Err(IrGenError::shape(
            format!(
                "{} argument(s) for '{}'",
                callable.params.len(),
                callable.name
            ),
            format!("{} argument(s)", call.arity()),
        ));
    }
    let promotion = plan_promotion(ctx, call, &callable.params)?;

    let details = CallDetails {
        target_var: Some(call.target_var.clone()),
        target_type: table.type_name(call.target_type).to_owned(),
        method: callable.name.clone(),
        param_types: callable
            .params
            .iter()
            .map(|&p| table.type_name(p).to_owned())
            .collect(),
        return_type: callable
            .return_type
            .map(|t| table.type_name(t).to_owned())
            .unwrap_or_else(|| names::VOID.to_owned()),
        args: promotion.arg_vars,
        metadata: metadata_of(callable),
    };
    Ok(ResolvedCall {
        symbol: Some(symbol),
        details,
        promotions: promotion.instrs,
        return_type: callable.return_type,
    })
}

fn build_table_call(table: &SymbolTable, call: &CallContext, entry: OperatorEntry) -> ResolvedCall {
    let (return_name, return_type) = match entry.result {
        OperatorResult::SameAsTarget => (
            table.type_name(call.target_type).to_owned(),
            Some(call.target_type),
        ),
        OperatorResult::Boolean => (names::BOOLEAN.to_owned(), table.lookup_type(names::BOOLEAN)),
        OperatorResult::PrimitiveBoolean => (names::PRIM_BOOL.to_owned(), None),
        OperatorResult::Void => (names::VOID.to_owned(), None),
    };

    // The table declares no parameter types; arguments pass through
    // unpromoted with their own types recorded.
    let details = CallDetails {
        target_var: Some(call.target_var.clone()),
        target_type: table.type_name(call.target_type).to_owned(),
        method: call.name.clone(),
        param_types: call
            .arg_types
            .iter()
            .map(|&t| table.type_name(t).to_owned())
            .collect(),
        return_type: return_name,
        args: call.arg_vars.to_vec(),
        metadata: CallMetadata {
            pure: entry.pure,
            complexity: 0,
            side_effects: entry.side_effects.iter().copied().collect(),
        },
    };
    ResolvedCall {
        symbol: None,
        details,
        promotions: Vec::new(),
        return_type,
    }
}

/// Check a resolved symbol has the kind the call shape demands.
pub fn expect_kind(
    table: &SymbolTable,
    symbol: SymbolId,
    expected: CallableKind,
) -> IrGenResult<()> {
    let callable = table.callable(symbol);
    if callable.kind == expected {
        Ok(())
    } else {
        Err(IrGenError::shape(
            expected.to_string(),
            format!("{} '{}'", callable.kind, callable.name),
        ))
    }
}

fn metadata_of(callable: &CallableSymbol) -> CallMetadata {
    CallMetadata {
        pure: callable.pure,
        complexity: callable.complexity,
        side_effects: callable.side_effects.clone(),
    }
}
