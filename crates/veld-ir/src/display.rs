//! Plain-text rendering of instruction streams.
//!
//! One line per instruction, nested block sections indented two spaces.
//! Used by tests and by `--dump-ir` style tooling in the build driver.

use std::fmt::Write as _;

use crate::instr::{Instr, IrOp};

/// Render a whole instruction stream, one instruction per line.
pub fn render(instrs: &[Instr]) -> String {
    let mut out = String::new();
    for instr in instrs {
        write_instr(&mut out, instr, 0);
    }
    out
}

fn write_instr(out: &mut String, instr: &Instr, indent: usize) {
    let pad = "  ".repeat(indent);
    match &instr.op {
        IrOp::Call(details) => {
            line(out, &pad, &instr.result, &format!("call {details}"));
        }
        IrOp::OperatorCall(details) => {
            line(out, &pad, &instr.result, &format!("opcall {details}"));
        }
        IrOp::LiteralLoad { value, type_name } => {
            line(out, &pad, &instr.result, &format!("load {value}: {type_name}"));
        }
        IrOp::Retain { var } => {
            line(out, &pad, &None, &format!("retain {var}"));
        }
        IrOp::ScopeRegister { var, scope_id } => {
            line(out, &pad, &None, &format!("register {var} -> {scope_id}"));
        }
        IrOp::ScopeEnter { scope_id } => {
            line(out, &pad, &None, &format!("enter {scope_id}"));
        }
        IrOp::ScopeExit { scope_id } => {
            line(out, &pad, &None, &format!("exit {scope_id}"));
        }
        IrOp::Store { dest, src } => {
            line(out, &pad, &None, &format!("store {src} -> {dest}"));
        }
        IrOp::LogicalBlock(block) => {
            line(
                out,
                &pad,
                &instr.result,
                &format!("{}_block cond {}", block.op, block.condition_var),
            );
            section(out, "lhs", &block.lhs, indent + 1);
            section(out, "rhs", &block.rhs, indent + 1);
            section(out, "result", &block.result, indent + 1);
        }
    }
}

fn line(out: &mut String, pad: &str, result: &Option<String>, body: &str) {
    match result {
        Some(var) => writeln!(out, "{pad}{var} = {body}").expect("write to String"),
        None => writeln!(out, "{pad}{body}").expect("write to String"),
    }
}

fn section(out: &mut String, label: &str, instrs: &[Instr], indent: usize) {
    let pad = "  ".repeat(indent);
    writeln!(out, "{pad}{label}:").expect("write to String");
    for instr in instrs {
        write_instr(out, instr, indent + 1);
    }
}

impl std::fmt::Display for Instr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = String::new();
        write_instr(&mut buf, self, 0);
        f.write_str(buf.trim_end_matches('\n'))
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::call::{CallDetails, CallMetadata};
    use crate::instr::{LogicalBlock, LogicalOp};

    fn load(result: &str, value: &str, type_name: &str) -> Instr {
        Instr::with_result(
            IrOp::LiteralLoad {
                value: value.into(),
                type_name: type_name.into(),
            },
            result,
        )
    }

    #[test]
    fn renders_flat_stream() {
        let instrs = vec![
            Instr::new(IrOp::ScopeEnter {
                scope_id: "_scope_1".into(),
            }),
            load("_temp_1", "0", "Integer"),
            Instr::new(IrOp::ScopeExit {
                scope_id: "_scope_1".into(),
            }),
        ];
        assert_snapshot!(render(&instrs), @r"
        enter _scope_1
        _temp_1 = load 0: Integer
        exit _scope_1
        ");
    }

    #[test]
    fn renders_operator_call_with_retain_pair() {
        let details = CallDetails {
            target_var: Some("lhs".into()),
            target_type: "Integer".into(),
            method: "+".into(),
            param_types: vec!["Integer".into()],
            return_type: "Integer".into(),
            args: vec!["rhs".into()],
            metadata: CallMetadata::default(),
        };
        let instrs = vec![
            Instr::with_result(IrOp::OperatorCall(details), "_temp_1"),
            Instr::new(IrOp::Retain {
                var: "_temp_1".into(),
            }),
            Instr::new(IrOp::ScopeRegister {
                var: "_temp_1".into(),
                scope_id: "_scope_1".into(),
            }),
        ];
        assert_snapshot!(render(&instrs), @r"
        _temp_1 = opcall lhs.+(rhs): Integer
        retain _temp_1
        register _temp_1 -> _scope_1
        ");
    }

    #[test]
    fn renders_logical_block_nested() {
        let block = LogicalBlock {
            op: LogicalOp::And,
            lhs: vec![load("_temp_1", "true", "Boolean")],
            condition_var: "_temp_2".into(),
            rhs: vec![load("_temp_3", "false", "Boolean")],
            result: vec![],
        };
        let instr = Instr::with_result(IrOp::LogicalBlock(block), "_temp_4");
        assert_snapshot!(render(std::slice::from_ref(&instr)), @r"
        _temp_4 = and_block cond _temp_2
          lhs:
            _temp_1 = load true: Boolean
          rhs:
            _temp_3 = load false: Boolean
          result:
        ");
    }
}
