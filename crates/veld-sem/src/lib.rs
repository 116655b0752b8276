//! The resolved-program oracle consumed by IR generation.
//!
//! Semantic analysis (out of scope here) builds a [`SymbolTable`] snapshot
//! via [`SymbolTableBuilder`] and hands it to IR generation read-only.
//! Every query on the table is immutable; independent IR generation workers
//! share one snapshot across threads.

pub mod ids;
pub mod names;
pub mod operators;
pub mod symbols;
pub mod table;
pub mod types;

pub use ids::{NodeId, SymbolId, TypeId};
pub use operators::{OperatorEntry, OperatorResult, operator_entry};
pub use symbols::{CallableKind, CallableSymbol};
pub use table::{COST_SUPER_HOP, NOT_ASSIGNABLE, SymbolTable, SymbolTableBuilder};
pub use types::TypeDef;
