//! End-to-end lowering checks for operator calls, promotion, and the
//! memory bookkeeping attached to their results.

mod common;

use common::{ctx, float, instrumented_ctx, int, numeric_table};
use insta::assert_snapshot;
use veld_core::SourceRef;
use veld_ir::{IrOp, render};
use veld_irgen::invoke::{ComparisonSpec, evaluate_comparison, invoke_binary_op};
use veld_irgen::{FrameKind, TypedVar};
use veld_sem::names;

#[test]
fn integer_addition_is_call_retain_register() {
    let table = numeric_table();
    let int = int(&table);
    let mut ctx = ctx(&table);
    let mut out = Vec::new();

    let value = ctx
        .scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
            invoke_binary_op(
                ctx,
                out,
                &TypedVar::new("a", int),
                "+",
                &TypedVar::new("b", int),
                None,
            )
        })
        .unwrap()
        .expect("addition produces a value");

    assert_eq!(value.type_id, int);
    assert_snapshot!(render(&out), @r"
    enter _scope_1
    _temp_1 = opcall a.+(b): Integer
    retain _temp_1
    register _temp_1 -> _scope_1
    exit _scope_1
    ");
}

#[test]
fn perfect_match_emits_no_promotions() {
    let table = numeric_table();
    let int = int(&table);
    let mut ctx = ctx(&table);
    let mut out = Vec::new();

    ctx.scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
        invoke_binary_op(
            ctx,
            out,
            &TypedVar::new("a", int),
            "*",
            &TypedVar::new("b", int),
            None,
        )
    })
    .unwrap();

    let promotions = out
        .iter()
        .filter(|i| matches!(&i.op, IrOp::OperatorCall(d) if d.method == names::PROMOTE))
        .count();
    assert_eq!(promotions, 0);
}

#[test]
fn mixed_addition_promotes_the_integer_operand_once() {
    let table = numeric_table();
    let int_ty = int(&table);
    let float_ty = float(&table);
    let mut ctx = ctx(&table);
    let mut out = Vec::new();

    let value = ctx
        .scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
            invoke_binary_op(
                ctx,
                out,
                &TypedVar::new("f", float_ty),
                "+",
                &TypedVar::new("i", int_ty),
                None,
            )
        })
        .unwrap()
        .expect("addition produces a value");

    assert_eq!(value.type_id, float_ty);

    let promotions: Vec<_> = out
        .iter()
        .filter(|i| matches!(&i.op, IrOp::OperatorCall(d) if d.method == names::PROMOTE))
        .collect();
    assert_eq!(promotions.len(), 1);
    let promoted_temp = promotions[0].result.clone().expect("promoted temporary");

    // The `+` call consumes the promoted temporary as its right operand.
    let add = out
        .iter()
        .find_map(|i| match &i.op {
            IrOp::OperatorCall(d) if d.method == "+" => Some(d),
            _ => None,
        })
        .expect("+ call");
    assert_eq!(add.args, vec![promoted_temp.clone()]);
    assert_eq!(add.return_type, "Float");

    // The promoted temporary is a heap result like any other: exactly one
    // retain and one registration, with the enclosing scope.
    let retains = out
        .iter()
        .filter(|i| matches!(&i.op, IrOp::Retain { var } if *var == promoted_temp))
        .count();
    assert_eq!(retains, 1);
    assert!(out.iter().any(|i| matches!(
        &i.op,
        IrOp::ScopeRegister { var, scope_id }
            if *var == promoted_temp && scope_id == "_scope_1"
    )));
}

#[test]
fn comparison_extracts_unmanaged_primitive() {
    let table = numeric_table();
    let int = int(&table);
    let mut ctx = ctx(&table);
    let mut out = Vec::new();

    let cond = ctx
        .scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
            let spec = ComparisonSpec::new(
                TypedVar::new("a", int),
                "<",
                TypedVar::new("b", int),
            );
            evaluate_comparison(ctx, out, &spec, None)
        })
        .unwrap();

    // Boxed comparison first, then the is-true extraction.
    let compare_at = out
        .iter()
        .position(|i| matches!(&i.op, IrOp::OperatorCall(d) if d.method == "<"))
        .expect("comparison call");
    let extract_at = out
        .iter()
        .position(|i| matches!(&i.op, IrOp::OperatorCall(d) if d.method == names::IS_TRUE))
        .expect("is-true call");
    assert!(compare_at < extract_at);
    assert_eq!(out[extract_at].result.as_deref(), Some(cond.as_str()));

    // The boxed intermediate is managed; the primitive is not.
    let boxed = out[compare_at].result.clone().unwrap();
    assert!(
        out.iter()
            .any(|i| matches!(&i.op, IrOp::Retain { var } if *var == boxed))
    );
    assert!(
        !out.iter()
            .any(|i| matches!(&i.op, IrOp::Retain { var } if *var == cond))
    );
    assert!(
        !out.iter()
            .any(|i| matches!(&i.op, IrOp::ScopeRegister { var, .. } if *var == cond))
    );
}

#[test]
fn compound_assignment_is_void_and_unmanaged() {
    let table = numeric_table();
    let int = int(&table);
    let mut ctx = ctx(&table);
    let mut out = Vec::new();

    let value = ctx
        .scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
            invoke_binary_op(
                ctx,
                out,
                &TypedVar::new("a", int),
                "+=",
                &TypedVar::new("b", int),
                None,
            )
        })
        .unwrap();

    assert!(value.is_none());
    let call = out
        .iter()
        .find_map(|i| match &i.op {
            IrOp::OperatorCall(d) => Some(d),
            _ => None,
        })
        .expect("compound-assignment call");
    assert_eq!(call.return_type, names::VOID);
    assert!(!call.metadata.pure);
    assert!(!out.iter().any(|i| matches!(i.op, IrOp::Retain { .. })));
    assert!(
        !out.iter()
            .any(|i| matches!(i.op, IrOp::ScopeRegister { .. }))
    );
}

/// Every retain is sandwiched between its defining instruction and the
/// matching scope registration.
#[test]
fn retains_pair_with_registrations_after_definition() {
    let table = numeric_table();
    let int_ty = int(&table);
    let float_ty = float(&table);
    let mut ctx = ctx(&table);
    let mut out = Vec::new();

    ctx.scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
        invoke_binary_op(
            ctx,
            out,
            &TypedVar::new("a", int_ty),
            "+",
            &TypedVar::new("b", int_ty),
            None,
        )?;
        invoke_binary_op(
            ctx,
            out,
            &TypedVar::new("f", float_ty),
            "*",
            &TypedVar::new("g", float_ty),
            None,
        )?;
        let spec = ComparisonSpec::new(TypedVar::new("a", int_ty), "<", TypedVar::new("b", int_ty));
        evaluate_comparison(ctx, out, &spec, None)
    })
    .unwrap();

    for (i, instr) in out.iter().enumerate() {
        if let IrOp::Retain { var } = &instr.op {
            assert_eq!(
                out[i - 1].result.as_deref(),
                Some(var.as_str()),
                "retain of {var} does not follow its defining instruction"
            );
            assert!(
                matches!(&out[i + 1].op, IrOp::ScopeRegister { var: v, .. } if v == var),
                "retain of {var} is not followed by its registration"
            );
        }
    }
    let retains = out
        .iter()
        .filter(|i| matches!(i.op, IrOp::Retain { .. }))
        .count();
    let registers = out
        .iter()
        .filter(|i| matches!(i.op, IrOp::ScopeRegister { .. }))
        .count();
    assert_eq!(retains, registers);
    assert_eq!(retains, 3);
}

#[test]
fn debug_info_present_only_under_instrumentation() {
    let table = numeric_table();
    let int_ty = int(&table);
    let src = SourceRef::new("main.veld", 4, 2);

    let mut plain = ctx(&table);
    let mut out = Vec::new();
    plain
        .scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
            invoke_binary_op(
                ctx,
                out,
                &TypedVar::new("a", int_ty),
                "+",
                &TypedVar::new("b", int_ty),
                Some(&src),
            )
        })
        .unwrap();
    assert!(out.iter().all(|i| i.debug.is_none()));

    let mut instrumented = instrumented_ctx(&table);
    let mut out = Vec::new();
    instrumented
        .scoped(&mut out, FrameKind::Block, "scope", |ctx, out| {
            invoke_binary_op(
                ctx,
                out,
                &TypedVar::new("a", int_ty),
                "+",
                &TypedVar::new("b", int_ty),
                Some(&src),
            )
        })
        .unwrap();

    let call_at = out
        .iter()
        .position(|i| matches!(i.op, IrOp::OperatorCall(_)))
        .expect("operator call");
    let debug = out[call_at].debug.as_ref().expect("debug info on call");
    assert_eq!(debug.file, "main.veld");
    assert_eq!(debug.line, 4);
    assert_eq!(debug.column, 2);
}
