//! Constructor and function call processors.
//!
//! Both share one pipeline: lower each argument expression recursively,
//! memory-manage the argument temporaries, build the call context, resolve,
//! and emit. Constructors always invoke the synthesized instance-init
//! method on a fresh instance; functions always invoke the fixed `_call`
//! entry point on a materialized function-instance value.

use veld_core::SourceRef;
use veld_ir::{Instr, IrOp};
use veld_sem::{CallableKind, NodeId, TypeId, names};

use crate::call_context::CallContext;
use crate::context::IrGenCtx;
use crate::errors::{IrGenError, IrGenResult};
use crate::memory::{VariableDetails, append_retain_and_register};
use crate::resolve::{expect_kind, resolve_call};
use crate::value::TypedVar;

/// Whether a call result feeds an enclosing expression or stands alone.
///
/// In statement context the composite result gets the full retain and
/// scope-register treatment; in expression context the enclosing lowering
/// owns the result and bookkeeping is not re-applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalContext {
    Statement,
    Expression,
}

/// Recursive lowering of argument expressions, supplied by the statement
/// and expression lowering that sits above this layer.
///
/// Implementations return the raw produced value without retaining or
/// scope-registering it; [`lower_arguments`] applies that bookkeeping once
/// per argument.
pub trait ExprLowerer {
    fn lower_expr(
        &mut self,
        ctx: &mut IrGenCtx,
        out: &mut Vec<Instr>,
        node: NodeId,
    ) -> IrGenResult<TypedVar>;
}

/// Lower every argument expression and memory-manage each temporary.
pub fn lower_arguments(
    lowerer: &mut dyn ExprLowerer,
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    args: &[NodeId],
    src: Option<&SourceRef>,
) -> IrGenResult<(Vec<TypeId>, Vec<String>)> {
    let mut types = Vec::with_capacity(args.len());
    let mut vars = Vec::with_capacity(args.len());
    for &arg in args {
        let value = lowerer.lower_expr(ctx, out, arg)?;
        let debug = src.and_then(|s| ctx.debug_info(s));
        append_retain_and_register(ctx, out, &VariableDetails::new(&value.var, debug));
        types.push(value.type_id);
        vars.push(value.var);
    }
    Ok((types, vars))
}

/// Lower `new Constructed(args...)` into an instance-init call.
pub fn process_constructor_call(
    lowerer: &mut dyn ExprLowerer,
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    constructed: TypeId,
    args: &[NodeId],
    node: Option<NodeId>,
    eval: EvalContext,
    src: Option<&SourceRef>,
) -> IrGenResult<TypedVar> {
    let (arg_types, arg_vars) = lower_arguments(lowerer, ctx, out, args, src)?;

    let instance = ctx.names.temp_name();
    let mut call = CallContext::call(
        constructed,
        &instance,
        names::INIT,
        arg_types,
        arg_vars,
        ctx.current_scope_id(),
    );
    if let Some(node) = node {
        call = call.with_node(node);
    }

    let resolved = resolve_call(ctx, &call)?;
    if let Some(symbol) = resolved.symbol {
        expect_kind(ctx.table, symbol, CallableKind::Constructor)?;
    }

    let debug = src.and_then(|s| ctx.debug_info(s));
    for promo in resolved.promotions {
        out.push(promo.with_debug(debug.clone()));
    }
    out.push(
        Instr::with_result(IrOp::Call(resolved.details), instance.clone())
            .with_debug(debug.clone()),
    );

    if eval == EvalContext::Statement {
        append_retain_and_register(ctx, out, &VariableDetails::new(&instance, debug));
    }

    // Constructors conceptually return the constructed type; a symbol with
    // no recorded return type still yields the instance.
    let result_type = resolved.return_type.unwrap_or(constructed);
    Ok(TypedVar::new(instance, result_type))
}

/// Lower `function(args...)` into a `_call` invocation on the materialized
/// function-instance value.
pub fn process_function_call(
    lowerer: &mut dyn ExprLowerer,
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    function: &TypedVar,
    args: &[NodeId],
    node: Option<NodeId>,
    eval: EvalContext,
    src: Option<&SourceRef>,
) -> IrGenResult<Option<TypedVar>> {
    let (arg_types, arg_vars) = lower_arguments(lowerer, ctx, out, args, src)?;

    let mut call = CallContext::call(
        function.type_id,
        &function.var,
        names::CALL,
        arg_types,
        arg_vars,
        ctx.current_scope_id(),
    );
    if let Some(node) = node {
        call = call.with_node(node);
    }

    let resolved = resolve_call(ctx, &call)?;
    if let Some(symbol) = resolved.symbol {
        expect_kind(ctx.table, symbol, CallableKind::Function)?;
    }

    let debug = src.and_then(|s| ctx.debug_info(s));
    for promo in resolved.promotions {
        out.push(promo.with_debug(debug.clone()));
    }

    if resolved.details.return_type == names::VOID {
        out.push(Instr::new(IrOp::Call(resolved.details)).with_debug(debug));
        return Ok(None);
    }

    let result_type = resolved.return_type.ok_or_else(|| {
        IrGenError::shape(
            "typed return".to_owned(),
            format!("untyped result '{}'", resolved.details.return_type),
        )
    })?;
    let temp = ctx.names.temp_name();
    out.push(Instr::with_result(IrOp::Call(resolved.details), temp.clone()).with_debug(debug.clone()));

    if eval == EvalContext::Statement {
        append_retain_and_register(ctx, out, &VariableDetails::new(&temp, debug));
    }
    Ok(Some(TypedVar::new(temp, result_type)))
}
