//! The immutable resolved-program snapshot and its construction API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, SymbolId, TypeId};
use crate::symbols::CallableSymbol;
use crate::types::TypeDef;

/// Cost added for each super-type hop when checking assignability.
pub const COST_SUPER_HOP: f64 = 0.5;

/// Sentinel cost meaning "not assignable at all".
pub const NOT_ASSIGNABLE: f64 = -1.0;

/// The resolved program as seen by IR generation.
///
/// Built once by semantic analysis, then shared read-only across all IR
/// generation workers. No method on this type mutates it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SymbolTable {
    types: Vec<TypeDef>,
    callables: Vec<CallableSymbol>,
    /// Call-site node → callable resolved during semantic analysis.
    resolved: HashMap<NodeId, SymbolId>,
    /// Expression node → resolved type.
    node_types: HashMap<NodeId, TypeId>,
}

impl SymbolTable {
    /// Look up a type definition.
    ///
    /// # Panics
    /// Panics if `id` was not minted by this table's builder.
    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }

    /// The declared name of a type.
    pub fn type_name(&self, id: TypeId) -> &str {
        &self.type_def(id).name
    }

    /// Look up a callable symbol.
    ///
    /// # Panics
    /// Panics if `id` was not minted by this table's builder.
    pub fn callable(&self, id: SymbolId) -> &CallableSymbol {
        &self.callables[id.index()]
    }

    /// Find a type by name.
    pub fn lookup_type(&self, name: &str) -> Option<TypeId> {
        self.types
            .iter()
            .position(|t| t.name == name)
            .map(|i| TypeId(i as u32))
    }

    /// The callable pre-resolved for a call-site node, if semantic analysis
    /// attached one.
    pub fn resolved_callable(&self, node: NodeId) -> Option<SymbolId> {
        self.resolved.get(&node).copied()
    }

    /// The type resolved for an expression node.
    pub fn node_type(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    /// Iterate a type and its super chain, nearest first.
    pub fn super_chain(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::successors(Some(ty), |&t| self.type_def(t).super_type)
    }

    /// The cost of assigning a value of type `from` where `to` is expected.
    ///
    /// `0.0` for an identical type, [`COST_SUPER_HOP`] per super-type
    /// traversal, and [`NOT_ASSIGNABLE`] when no path exists. Promotion is
    /// deliberately not considered here; the resolution engine layers it on.
    pub fn assignability_cost(&self, from: TypeId, to: TypeId) -> f64 {
        let mut cost = 0.0;
        for t in self.super_chain(from) {
            if t == to {
                return cost;
            }
            cost += COST_SUPER_HOP;
        }
        NOT_ASSIGNABLE
    }

    /// The designated promotion operator of a type, if it declares one.
    ///
    /// Promotion operators are looked up on the exact type only, never
    /// inherited: a promoted value is never promoted again.
    pub fn promotion_of(&self, ty: TypeId) -> Option<SymbolId> {
        self.type_def(ty).promotion
    }

    /// The result type of a type's zero-argument promotion operator.
    pub fn promoted_type(&self, ty: TypeId) -> Option<TypeId> {
        self.promotion_of(ty)
            .and_then(|sym| self.callable(sym).return_type)
    }

    /// Candidate callables named `name` with `arity` parameters, visible on
    /// `owner` or its super chain.
    ///
    /// A super-type candidate whose parameter list is identical to one
    /// already found on a nearer type is an override and is skipped.
    pub fn matching_callables(&self, owner: TypeId, name: &str, arity: usize) -> Vec<SymbolId> {
        let mut found: Vec<SymbolId> = Vec::new();
        for ty in self.super_chain(owner) {
            for &sym in &self.type_def(ty).methods {
                let c = self.callable(sym);
                if c.name != name || c.params.len() != arity {
                    continue;
                }
                let overridden = found
                    .iter()
                    .any(|&prior| self.callable(prior).params == c.params);
                if !overridden {
                    found.push(sym);
                }
            }
        }
        found
    }
}

/// Construction API used by semantic analysis (and test fixtures).
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    table: SymbolTable,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type with no super type.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeId {
        let id = TypeId(self.table.types.len() as u32);
        self.table.types.push(TypeDef::new(name));
        id
    }

    /// Register a type extending `super_type`.
    pub fn add_subtype(&mut self, name: impl Into<String>, super_type: TypeId) -> TypeId {
        let id = self.add_type(name);
        self.table.types[id.index()].super_type = Some(super_type);
        id
    }

    /// Register a callable declared on `owner`.
    pub fn add_method(&mut self, owner: TypeId, symbol: CallableSymbol) -> SymbolId {
        let id = SymbolId(self.table.callables.len() as u32);
        self.table.callables.push(CallableSymbol {
            owner: Some(owner),
            ..symbol
        });
        self.table.types[owner.index()].methods.push(id);
        id
    }

    /// Register a free function.
    pub fn add_function(&mut self, symbol: CallableSymbol) -> SymbolId {
        let id = SymbolId(self.table.callables.len() as u32);
        self.table.callables.push(symbol);
        id
    }

    /// Mark `symbol` as the designated promotion operator of `ty`.
    pub fn set_promotion(&mut self, ty: TypeId, symbol: SymbolId) {
        self.table.types[ty.index()].promotion = Some(symbol);
    }

    /// Record the callable semantic analysis resolved for a call site.
    pub fn record_resolution(&mut self, node: NodeId, symbol: SymbolId) {
        self.table.resolved.insert(node, symbol);
    }

    /// Record the type of an expression node.
    pub fn record_node_type(&mut self, node: NodeId, ty: TypeId) {
        self.table.node_types.insert(node, ty);
    }

    pub fn build(self) -> SymbolTable {
        self.table
    }
}
