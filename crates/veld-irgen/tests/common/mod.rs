//! Shared fixture: a small numeric world with boxed booleans.

use veld_core::CompilerFlags;
use veld_irgen::IrGenCtx;
use veld_sem::{CallableSymbol, SymbolTable, SymbolTableBuilder, TypeId, names};

/// Boolean, Integer, and Float, with arithmetic and comparison operators
/// on both numeric types and a single-step promotion Integer -> Float.
pub fn numeric_table() -> SymbolTable {
    let mut b = SymbolTableBuilder::new();
    b.add_type(names::BOOLEAN);
    let int = b.add_type("Integer");
    let float = b.add_type("Float");

    for op in ["+", "-", "*", "/"] {
        b.add_method(int, CallableSymbol::operator(op, vec![int], Some(int)));
        b.add_method(float, CallableSymbol::operator(op, vec![float], Some(float)));
    }

    let promote = b.add_method(
        int,
        CallableSymbol::operator(names::PROMOTE, vec![], Some(float)),
    );
    b.set_promotion(int, promote);

    b.build()
}

pub fn int(table: &SymbolTable) -> TypeId {
    table.lookup_type("Integer").expect("Integer in fixture")
}

pub fn float(table: &SymbolTable) -> TypeId {
    table.lookup_type("Float").expect("Float in fixture")
}

pub fn ctx(table: &SymbolTable) -> IrGenCtx<'_> {
    IrGenCtx::new(table, CompilerFlags::default())
}

pub fn instrumented_ctx(table: &SymbolTable) -> IrGenCtx<'_> {
    IrGenCtx::new(table, CompilerFlags::with_debug_instrumentation())
}
