//! The memory-management wrapper.
//!
//! Every heap result variable gets exactly one `Retain` and one
//! `ScopeRegister` immediately after the instruction that defined it.
//! Callers never emit these two by hand; they route producers through
//! [`managed`] instead. Transfer-owned variables (`_param_`, `_rtn_`
//! prefixes) are kept out by the name-minting helpers, not by this module.

use veld_core::DebugInfo;
use veld_ir::{Instr, IrOp};

use crate::context::IrGenCtx;
use crate::errors::IrGenResult;

/// The variable the wrapper acts on.
#[derive(Clone, Debug)]
pub struct VariableDetails {
    pub name: String,
    pub debug: Option<DebugInfo>,
}

impl VariableDetails {
    pub fn new(name: impl Into<String>, debug: Option<DebugInfo>) -> Self {
        Self {
            name: name.into(),
            debug,
        }
    }
}

/// Run `producer`, then append the retain and scope-register bookkeeping
/// for `var` to `out`.
pub fn managed(
    ctx: &mut IrGenCtx,
    out: &mut Vec<Instr>,
    var: VariableDetails,
    producer: impl FnOnce(&mut IrGenCtx, &mut Vec<Instr>) -> IrGenResult<()>,
) -> IrGenResult<()> {
    producer(ctx, out)?;
    append_retain_and_register(ctx, out, &var);
    Ok(())
}

/// Append the two bookkeeping instructions for an already-produced value.
pub fn append_retain_and_register(ctx: &IrGenCtx, out: &mut Vec<Instr>, var: &VariableDetails) {
    append_retain_and_register_in(out, var, ctx.current_scope_id());
}

/// Append the bookkeeping for a value owned by an explicitly named scope.
pub fn append_retain_and_register_in(out: &mut Vec<Instr>, var: &VariableDetails, scope_id: &str) {
    out.push(
        Instr::new(IrOp::Retain {
            var: var.name.clone(),
        })
        .with_debug(var.debug.clone()),
    );
    out.push(
        Instr::new(IrOp::ScopeRegister {
            var: var.name.clone(),
            scope_id: scope_id.to_owned(),
        })
        .with_debug(var.debug.clone()),
    );
}
