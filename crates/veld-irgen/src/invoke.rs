//! Operator and call invokers.
//!
//! These compose the resolution engine with the memory wrapper: resolve,
//! emit promotions, emit the call, then retain and scope-register the
//! result when it is a heap value. Void results and primitive booleans get
//! no bookkeeping.

use veld_core::SourceRef;
use veld_ir::{Instr, IrOp};
use veld_sem::names;

use crate::call_context::{CallContext, CallShape};
use crate::context::IrGenCtx;
use crate::errors::{IrGenError, IrGenResult};
use crate::memory::{VariableDetails, append_retain_and_register, managed};
use crate::resolve::resolve_call;
use crate::value::TypedVar;

/// A single comparison of a chained pair.
#[derive(Clone, Debug)]
pub struct ComparisonSpec {
    pub lhs: TypedVar,
    pub operator: String,
    pub rhs: TypedVar,
}

impl ComparisonSpec {
    pub fn new(lhs: TypedVar, operator: impl Into<String>, rhs: TypedVar) -> Self {
        Self {
            lhs,
            operator: operator.into(),
            rhs,
        }
    }
}

/// What a raw invocation produced.
enum OpOutcome {
    Void,
    Value(TypedVar),
    /// Primitive boolean result variable; value-typed, never retained.
    Primitive(String),
}

/// Resolve and emit one call, without memory bookkeeping.
fn invoke_raw(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    call: &CallContext,
    src: Option<&SourceRef>,
) -> IrGenResult<OpOutcome> {
    let debug = src.and_then(|s| ctx.debug_info(s));
    let resolved = resolve_call(ctx, call)?;
    for promo in resolved.promotions {
        out.push(promo.with_debug(debug.clone()));
    }

    let op = match call.shape {
        CallShape::BinaryOp | CallShape::UnaryOp => IrOp::OperatorCall(resolved.details.clone()),
        CallShape::Call => IrOp::Call(resolved.details.clone()),
    };

    if resolved.details.return_type == names::VOID {
        out.push(Instr::new(op).with_debug(debug));
        return Ok(OpOutcome::Void);
    }

    let temp = ctx.names.temp_name();
    out.push(Instr::with_result(op, temp.clone()).with_debug(debug));

    if resolved.details.return_type == names::PRIM_BOOL {
        return Ok(OpOutcome::Primitive(temp));
    }
    let type_id = match resolved.return_type {
        Some(t) => t,
        // Only the operator table's boxed-Boolean entries leave the id
        // implicit.
        None => ctx.well_known_type(names::BOOLEAN)?,
    };
    Ok(OpOutcome::Value(TypedVar::new(temp, type_id)))
}

/// Invoke a call and wrap any heap result with retain + scope-register.
fn invoke_managed(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    call: &CallContext,
    src: Option<&SourceRef>,
) -> IrGenResult<Option<TypedVar>> {
    match invoke_raw(ctx, out, call, src)? {
        OpOutcome::Void => Ok(None),
        OpOutcome::Value(value) => {
            let debug = src.and_then(|s| ctx.debug_info(s));
            append_retain_and_register(ctx, out, &VariableDetails::new(&value.var, debug));
            Ok(Some(value))
        }
        OpOutcome::Primitive(var) => Err(IrGenError::shape(
            "boxed or void result",
            format!("primitive boolean '{var}'"),
        )),
    }
}

/// `lhs.operator(rhs)`; `None` for void-returning mutating forms.
pub fn invoke_binary_op(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    lhs: &TypedVar,
    operator: &str,
    rhs: &TypedVar,
    src: Option<&SourceRef>,
) -> IrGenResult<Option<TypedVar>> {
    let call = CallContext::binary_op(
        lhs.type_id,
        &lhs.var,
        operator,
        rhs.type_id,
        &rhs.var,
        ctx.current_scope_id(),
    );
    invoke_managed(ctx, out, &call, src)
}

/// `target.operator()`; `None` for void-returning forms.
pub fn invoke_unary_op(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    target: &TypedVar,
    operator: &str,
    src: Option<&SourceRef>,
) -> IrGenResult<Option<TypedVar>> {
    let call = CallContext::unary_op(target.type_id, &target.var, operator, ctx.current_scope_id());
    invoke_managed(ctx, out, &call, src)
}

/// Extract a primitive boolean from a boxed boolean via its is-true query.
///
/// The primitive result is value-typed, so no retain or scope-register is
/// emitted for it.
pub fn extract_primitive_bool(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    boxed: &TypedVar,
    src: Option<&SourceRef>,
) -> IrGenResult<String> {
    let call = CallContext::unary_op(
        boxed.type_id,
        &boxed.var,
        names::IS_TRUE,
        ctx.current_scope_id(),
    );
    match invoke_raw(ctx, out, &call, src)? {
        OpOutcome::Primitive(var) => Ok(var),
        OpOutcome::Void => Err(IrGenError::shape("primitive boolean", "void".to_owned())),
        OpOutcome::Value(value) => Err(IrGenError::shape(
            "primitive boolean",
            format!("boxed value '{}'", value.var),
        )),
    }
}

/// Compare, then reduce the boxed boolean to a primitive condition.
///
/// Returns the primitive-boolean variable.
pub fn evaluate_comparison(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    spec: &ComparisonSpec,
    src: Option<&SourceRef>,
) -> IrGenResult<String> {
    let boxed = invoke_binary_op(ctx, out, &spec.lhs, &spec.operator, &spec.rhs, src)?
        .ok_or_else(|| IrGenError::shape("boxed boolean", format!("void '{}'", spec.operator)))?;
    extract_primitive_bool(ctx, out, &boxed, src)
}

/// Two comparisons in sequence; used for runtime direction detection
/// followed by the loop-continuation test.
pub fn evaluate_chained_comparison(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    first: &ComparisonSpec,
    second: &ComparisonSpec,
    src: Option<&SourceRef>,
) -> IrGenResult<(String, String)> {
    let first_cond = evaluate_comparison(ctx, out, first, src)?;
    let second_cond = evaluate_comparison(ctx, out, second, src)?;
    Ok((first_cond, second_cond))
}

/// Load a boxed `false` literal, retained and scope-registered.
pub fn construct_false(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    src: Option<&SourceRef>,
) -> IrGenResult<TypedVar> {
    let boolean = ctx.well_known_type(names::BOOLEAN)?;
    let debug = src.and_then(|s| ctx.debug_info(s));
    let temp = ctx.names.temp_name();
    managed(
        ctx,
        out,
        VariableDetails::new(&temp, debug.clone()),
        |_, out| {
            out.push(
                Instr::with_result(
                    IrOp::LiteralLoad {
                        value: "false".to_owned(),
                        type_name: names::BOOLEAN.to_owned(),
                    },
                    temp.clone(),
                )
                .with_debug(debug),
            );
            Ok(())
        },
    )?;
    Ok(TypedVar::new(temp, boolean))
}

/// Boolean negation on a boxed boolean.
pub fn logical_not(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    value: &TypedVar,
    src: Option<&SourceRef>,
) -> IrGenResult<TypedVar> {
    invoke_unary_op(ctx, out, value, names::NOT, src)?
        .ok_or_else(|| IrGenError::shape("boxed boolean", "void".to_owned()))
}

/// Is-set query on any boxed value.
pub fn is_set(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    value: &TypedVar,
    src: Option<&SourceRef>,
) -> IrGenResult<TypedVar> {
    invoke_unary_op(ctx, out, value, names::IS_SET, src)?
        .ok_or_else(|| IrGenError::shape("boxed boolean", "void".to_owned()))
}
