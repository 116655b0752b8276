//! Callable symbols recorded by semantic analysis.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use veld_core::SideEffect;

use crate::ids::TypeId;

/// The kind of a callable symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallableKind {
    Method,
    Operator,
    Constructor,
    Function,
}

impl std::fmt::Display for CallableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallableKind::Method => write!(f, "method"),
            CallableKind::Operator => write!(f, "operator"),
            CallableKind::Constructor => write!(f, "constructor"),
            CallableKind::Function => write!(f, "function"),
        }
    }
}

/// A fully resolved callable: declared parameter types, return type, and the
/// call metadata IR generation embeds into emitted call details.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableSymbol {
    pub name: String,
    pub kind: CallableKind,
    /// Declaring type; `None` for free functions.
    pub owner: Option<TypeId>,
    pub params: Vec<TypeId>,
    /// `None` means the callable produces no value.
    pub return_type: Option<TypeId>,
    pub pure: bool,
    /// Cyclomatic-style weight computed during semantic analysis.
    pub complexity: u32,
    pub side_effects: BTreeSet<SideEffect>,
}

impl CallableSymbol {
    fn new(name: impl Into<String>, kind: CallableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            owner: None,
            params: Vec::new(),
            return_type: None,
            pure: true,
            complexity: 0,
            side_effects: BTreeSet::new(),
        }
    }

    pub fn method(name: impl Into<String>, params: Vec<TypeId>, return_type: Option<TypeId>) -> Self {
        Self {
            params,
            return_type,
            ..Self::new(name, CallableKind::Method)
        }
    }

    pub fn operator(name: impl Into<String>, params: Vec<TypeId>, return_type: Option<TypeId>) -> Self {
        Self {
            params,
            return_type,
            ..Self::new(name, CallableKind::Operator)
        }
    }

    pub fn constructor(name: impl Into<String>, params: Vec<TypeId>, constructed: TypeId) -> Self {
        Self {
            params,
            return_type: Some(constructed),
            ..Self::new(name, CallableKind::Constructor)
        }
    }

    pub fn function(name: impl Into<String>, params: Vec<TypeId>, return_type: Option<TypeId>) -> Self {
        Self {
            params,
            return_type,
            ..Self::new(name, CallableKind::Function)
        }
    }

    pub fn impure(mut self) -> Self {
        self.pure = false;
        self
    }

    pub fn with_complexity(mut self, complexity: u32) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_side_effect(mut self, effect: SideEffect) -> Self {
        self.side_effects.insert(effect);
        self
    }
}
