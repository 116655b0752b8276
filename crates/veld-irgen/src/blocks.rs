//! Control-flow block builders.
//!
//! Higher-level declarative constructs composed from the invokers: the
//! short-circuit AND/OR block, and the direction check plus increment pair
//! backing bidirectional for-range loops.

use veld_core::SourceRef;
use veld_ir::{Instr, IrOp, LogicalBlock, LogicalOp};

use crate::context::IrGenCtx;
use crate::errors::IrGenResult;
use crate::frames::FrameKind;
use crate::invoke::{
    ComparisonSpec, evaluate_comparison, extract_primitive_bool, invoke_binary_op, invoke_unary_op,
};
use crate::memory::{VariableDetails, managed};
use crate::value::TypedVar;

/// One operand of a logical connective, already lowered to instructions
/// plus the boxed-boolean variable they produce.
#[derive(Clone, Debug)]
pub struct LoweredOperand {
    pub instrs: Vec<Instr>,
    pub value: TypedVar,
}

impl LoweredOperand {
    pub fn new(instrs: Vec<Instr>, value: TypedVar) -> Self {
        Self { instrs, value }
    }
}

/// Build one declarative short-circuit AND/OR block instruction.
///
/// The left operand's instructions are extended with the primitive
/// condition extraction; the result section invokes the boxed `_and`/`_or`
/// operator, retained and scope-registered. Whether the backend actually
/// short-circuits on the condition or evaluates both sides is its call.
pub fn build_short_circuit(
    ctx: &mut IrGenCtx,
    op: LogicalOp,
    lhs: LoweredOperand,
    rhs: LoweredOperand,
    src: Option<&SourceRef>,
) -> IrGenResult<Instr> {
    let LoweredOperand {
        instrs: mut lhs_instrs,
        value: lhs_value,
    } = lhs;
    let condition_var = extract_primitive_bool(ctx, &mut lhs_instrs, &lhs_value, src)?;

    let mut result_instrs = Vec::new();
    let result = invoke_binary_op(
        ctx,
        &mut result_instrs,
        &lhs_value,
        op.method_name(),
        &rhs.value,
        src,
    )?
    .ok_or_else(|| {
        crate::errors::IrGenError::shape("boxed boolean", format!("void '{}'", op.method_name()))
    })?;

    let debug = src.and_then(|s| ctx.debug_info(s));
    Ok(Instr::with_result(
        IrOp::LogicalBlock(LogicalBlock {
            op,
            lhs: lhs_instrs,
            condition_var,
            rhs: rhs.instrs,
            result: result_instrs,
        }),
        result.var,
    )
    .with_debug(debug))
}

/// The three operator choices distinguishing loop directions.
///
/// Ascending and descending for-range loops differ in these operators and
/// nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionConfig {
    /// Compares the three-way direction value against zero.
    pub direction_compare: &'static str,
    /// The loop-continuation test between counter and bound.
    pub continue_compare: &'static str,
    /// The counter step operator.
    pub step: &'static str,
}

pub const ASCENDING: DirectionConfig = DirectionConfig {
    direction_compare: "<",
    continue_compare: "<=",
    step: "++",
};

pub const DESCENDING: DirectionConfig = DirectionConfig {
    direction_compare: ">",
    continue_compare: ">=",
    step: "--",
};

/// Test a previously computed three-way direction value against zero.
///
/// Runs inside its own temporary scope; returns the primitive-boolean
/// condition variable.
pub fn build_direction_check(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    direction: &TypedVar,
    config: DirectionConfig,
    src: Option<&SourceRef>,
) -> IrGenResult<String> {
    ctx.scoped(out, FrameKind::Expression, "check", |ctx, out| {
        let debug = src.and_then(|s| ctx.debug_info(s));
        let zero = ctx.names.temp_name();
        managed(
            ctx,
            out,
            VariableDetails::new(&zero, debug.clone()),
            |ctx, out| {
                out.push(
                    Instr::with_result(
                        IrOp::LiteralLoad {
                            value: "0".to_owned(),
                            type_name: ctx.table.type_name(direction.type_id).to_owned(),
                        },
                        zero.clone(),
                    )
                    .with_debug(debug),
                );
                Ok(())
            },
        )?;

        let spec = ComparisonSpec::new(
            direction.clone(),
            config.direction_compare,
            TypedVar::new(zero, direction.type_id),
        );
        evaluate_comparison(ctx, out, &spec, src)
    })
}

/// Step the loop counter and store the result back into it.
pub fn evaluate_increment(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    counter: &TypedVar,
    config: DirectionConfig,
    src: Option<&SourceRef>,
) -> IrGenResult<()> {
    let stepped = invoke_unary_op(ctx, out, counter, config.step, src)?.ok_or_else(|| {
        crate::errors::IrGenError::shape("stepped counter", format!("void '{}'", config.step))
    })?;
    let debug = src.and_then(|s| ctx.debug_info(s));
    out.push(
        Instr::new(IrOp::Store {
            dest: counter.var.clone(),
            src: stepped.var,
        })
        .with_debug(debug),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use veld_core::CompilerFlags;
    use veld_sem::{SymbolTable, SymbolTableBuilder, names};

    use super::*;

    fn boolean_table() -> SymbolTable {
        let mut b = SymbolTableBuilder::new();
        b.add_type(names::BOOLEAN);
        b.add_type("Integer");
        b.build()
    }

    fn boxed_operand(ctx: &mut IrGenCtx, table: &SymbolTable, var: &str) -> LoweredOperand {
        let boolean = table.lookup_type(names::BOOLEAN).unwrap();
        let temp = ctx.names.temp_name();
        let load = Instr::with_result(
            IrOp::LiteralLoad {
                value: var.to_owned(),
                type_name: names::BOOLEAN.to_owned(),
            },
            temp.clone(),
        );
        LoweredOperand::new(vec![load], TypedVar::new(temp, boolean))
    }

    #[test]
    fn short_circuit_block_carries_condition_and_result() {
        let table = boolean_table();
        let mut ctx = IrGenCtx::new(&table, CompilerFlags::default());
        let mut outer = Vec::new();

        let block = ctx
            .scoped(&mut outer, FrameKind::Block, "scope", |ctx, _| {
                let lhs = boxed_operand(ctx, &table, "a");
                let rhs = boxed_operand(ctx, &table, "b");
                build_short_circuit(ctx, LogicalOp::And, lhs, rhs, None)
            })
            .unwrap();

        let IrOp::LogicalBlock(payload) = &block.op else {
            panic!("expected a logical block");
        };
        assert_eq!(payload.op, LogicalOp::And);
        // Left side always ends in the primitive condition extraction.
        assert!(payload.lhs.len() >= 2);
        let last = payload.lhs.last().unwrap();
        assert!(matches!(&last.op, IrOp::OperatorCall(d) if d.method == names::IS_TRUE));
        assert_eq!(last.result.as_deref(), Some(payload.condition_var.as_str()));
        // Result section: _and call, retain, register.
        assert_eq!(payload.result.len(), 3);
        assert!(matches!(&payload.result[0].op, IrOp::OperatorCall(d) if d.method == names::AND));
        assert!(matches!(&payload.result[1].op, IrOp::Retain { .. }));
        assert!(matches!(&payload.result[2].op, IrOp::ScopeRegister { .. }));
        assert_eq!(block.result.as_deref(), payload.result[0].result.as_deref());
    }

    #[test]
    fn or_block_with_empty_right_branch_still_has_condition() {
        let table = boolean_table();
        let mut ctx = IrGenCtx::new(&table, CompilerFlags::default());
        let mut outer = Vec::new();

        let block = ctx
            .scoped(&mut outer, FrameKind::Block, "scope", |ctx, _| {
                let lhs = boxed_operand(ctx, &table, "a");
                let boolean = table.lookup_type(names::BOOLEAN).unwrap();
                // Right operand already lowered elsewhere.
                let rhs = LoweredOperand::new(Vec::new(), TypedVar::new("b", boolean));
                build_short_circuit(ctx, LogicalOp::Or, lhs, rhs, None)
            })
            .unwrap();

        let IrOp::LogicalBlock(payload) = &block.op else {
            panic!("expected a logical block");
        };
        assert_eq!(payload.op, LogicalOp::Or);
        assert!(payload.rhs.is_empty());
        assert!(!payload.lhs.is_empty());
        assert!(!payload.condition_var.is_empty());
        assert!(matches!(&payload.result[0].op, IrOp::OperatorCall(d) if d.method == names::OR));
    }

    #[test]
    fn direction_configs_differ_in_exactly_three_operators() {
        assert_eq!(ASCENDING.direction_compare, "<");
        assert_eq!(ASCENDING.continue_compare, "<=");
        assert_eq!(ASCENDING.step, "++");
        assert_eq!(DESCENDING.direction_compare, ">");
        assert_eq!(DESCENDING.continue_compare, ">=");
        assert_eq!(DESCENDING.step, "--");
        assert_ne!(ASCENDING.direction_compare, DESCENDING.direction_compare);
        assert_ne!(ASCENDING.continue_compare, DESCENDING.continue_compare);
        assert_ne!(ASCENDING.step, DESCENDING.step);
    }

    #[test]
    fn direction_check_runs_in_its_own_scope() {
        let table = boolean_table();
        let int = table.lookup_type("Integer").unwrap();
        let mut ctx = IrGenCtx::new(&table, CompilerFlags::default());
        let mut out = Vec::new();

        let cond = ctx
            .scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
                build_direction_check(ctx, out, &TypedVar::new("dir", int), ASCENDING, None)
            })
            .unwrap();

        veld_ir::check_scope_balance(&out).unwrap();
        assert!(!cond.is_empty());
        // Inner check scope: enter, load zero, retain, register, compare,
        // retain, register, is-true, exit.
        assert!(matches!(&out[1].op, IrOp::ScopeEnter { scope_id } if scope_id == "_check_1"));
        assert!(matches!(
            &out[2].op,
            IrOp::LiteralLoad { value, type_name } if value == "0" && type_name == "Integer"
        ));
        assert!(
            out.iter()
                .any(|i| matches!(&i.op, IrOp::OperatorCall(d) if d.method == "<"))
        );
    }

    #[test]
    fn increment_stores_back_into_counter() {
        let table = boolean_table();
        let int = table.lookup_type("Integer").unwrap();
        let mut ctx = IrGenCtx::new(&table, CompilerFlags::default());
        let mut out = Vec::new();

        ctx.scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
            evaluate_increment(ctx, out, &TypedVar::new("i", int), DESCENDING, None)
        })
        .unwrap();

        let step = out
            .iter()
            .find_map(|i| match &i.op {
                IrOp::OperatorCall(d) => Some(d),
                _ => None,
            })
            .expect("step operator call");
        assert_eq!(step.method, "--");
        let stepped = step_result(&out);
        assert!(matches!(
            out.last().map(|i| &i.op),
            Some(IrOp::ScopeExit { .. })
        ));
        assert!(out.iter().any(|i| matches!(
            &i.op,
            IrOp::Store { dest, src } if dest == "i" && *src == stepped
        )));
    }

    fn step_result(out: &[Instr]) -> String {
        out.iter()
            .find_map(|i| match &i.op {
                IrOp::OperatorCall(_) => i.result.clone(),
                _ => None,
            })
            .expect("step result variable")
    }
}
