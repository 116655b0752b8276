//! Structural checks over emitted instruction streams.

use crate::instr::{Instr, IrOp};

/// Check that scope enter/exit instructions balance and nest correctly.
///
/// Logical-block sub-streams are validated independently: each one must be
/// balanced on its own, since a backend may lower it out of line.
pub fn check_scope_balance(instrs: &[Instr]) -> Result<(), String> {
    let mut stack: Vec<&str> = Vec::new();
    walk(instrs, &mut stack)?;
    match stack.last() {
        Some(open) => Err(format!("scope '{open}' entered but never exited")),
        None => Ok(()),
    }
}

fn walk<'a>(instrs: &'a [Instr], stack: &mut Vec<&'a str>) -> Result<(), String> {
    for instr in instrs {
        match &instr.op {
            IrOp::ScopeEnter { scope_id } => stack.push(scope_id),
            IrOp::ScopeExit { scope_id } => match stack.pop() {
                Some(open) if open == scope_id => {}
                Some(open) => {
                    return Err(format!(
                        "scope '{scope_id}' exited while '{open}' was innermost"
                    ));
                }
                None => return Err(format!("scope '{scope_id}' exited but never entered")),
            },
            IrOp::LogicalBlock(block) => {
                check_scope_balance(&block.lhs)?;
                check_scope_balance(&block.rhs)?;
                check_scope_balance(&block.result)?;
            }
            _ => {}
        }
    }
    Ok(())
}
