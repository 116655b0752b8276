//! The per-compilation-unit generation context.

use veld_core::{CompilerFlags, DebugInfo, SourceRef};
use veld_ir::{Instr, IrOp};
use veld_sem::{SymbolTable, TypeId};

use crate::errors::{IrGenError, IrGenResult};
use crate::frames::{FrameKind, ScopeFrame, ScopeStack};
use crate::names::NameGenerator;

/// State owned by one compilation unit during IR generation.
///
/// The symbol table is a shared immutable snapshot; everything else is
/// private to the unit, so independent units can generate in parallel.
pub struct IrGenCtx<'a> {
    pub table: &'a SymbolTable,
    pub flags: CompilerFlags,
    pub stack: ScopeStack,
    pub names: NameGenerator,
}

impl<'a> IrGenCtx<'a> {
    pub fn new(table: &'a SymbolTable, flags: CompilerFlags) -> Self {
        Self {
            table,
            flags,
            stack: ScopeStack::new(),
            names: NameGenerator::new(),
        }
    }

    /// Debug metadata for a token, present only under instrumentation.
    pub fn debug_info(&self, src: &SourceRef) -> Option<DebugInfo> {
        self.flags
            .debug_instrumentation
            .then(|| DebugInfo::from(src))
    }

    /// The id of the innermost scope.
    ///
    /// # Panics
    /// Panics if no scope has been entered.
    pub fn current_scope_id(&self) -> &str {
        self.stack.current_scope_id()
    }

    /// Look up a type the generator depends on structurally (e.g. the boxed
    /// `Boolean`). Absence is a compiler defect, not a user error.
    pub fn well_known_type(&self, name: &'static str) -> IrGenResult<TypeId> {
        self.table
            .lookup_type(name)
            .ok_or_else(|| IrGenError::missing_well_known_type(name))
    }

    /// Run `step` inside a fresh scope: mint an id, push the frame, emit
    /// `ScopeEnter`, run, emit `ScopeExit`, pop.
    ///
    /// The exit instruction and the pop happen even when `step` fails, so
    /// emitted streams stay balanced.
    pub fn scoped<R>(
        &mut self,
        out: &mut Vec<Instr>,
        kind: FrameKind,
        prefix: &str,
        step: impl FnOnce(&mut Self, &mut Vec<Instr>) -> IrGenResult<R>,
    ) -> IrGenResult<R> {
        let scope_id = self.names.scope_id(prefix);
        self.stack.push(ScopeFrame::new(scope_id.clone(), kind));
        out.push(Instr::new(IrOp::ScopeEnter {
            scope_id: scope_id.clone(),
        }));

        let result = step(self, out);

        out.push(Instr::new(IrOp::ScopeExit { scope_id }));
        self.stack.pop();
        result
    }
}
