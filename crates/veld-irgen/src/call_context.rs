//! Call-site descriptions handed to the resolution engine.

use smallvec::{SmallVec, smallvec};
use veld_sem::{NodeId, TypeId};

/// The shape of a call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallShape {
    BinaryOp,
    UnaryOp,
    Call,
}

/// One call site: receiver, callable name, and arguments.
///
/// Argument-type and argument-variable lists always have equal length; the
/// constructors enforce it.
#[derive(Clone, Debug)]
pub struct CallContext {
    pub shape: CallShape,
    pub target_type: TypeId,
    pub target_var: String,
    pub name: String,
    pub arg_types: SmallVec<[TypeId; 2]>,
    pub arg_vars: SmallVec<[String; 2]>,
    /// The scope enclosing the call site.
    pub scope_id: String,
    /// Parse-tree node for looking up the callable semantic analysis
    /// already resolved. `None` for pure operator contexts.
    pub node: Option<NodeId>,
}

impl CallContext {
    /// `target.operator(rhs)`.
    pub fn binary_op(
        target_type: TypeId,
        target_var: impl Into<String>,
        operator: impl Into<String>,
        rhs_type: TypeId,
        rhs_var: impl Into<String>,
        scope_id: impl Into<String>,
    ) -> Self {
        Self {
            shape: CallShape::BinaryOp,
            target_type,
            target_var: target_var.into(),
            name: operator.into(),
            arg_types: smallvec![rhs_type],
            arg_vars: smallvec![rhs_var.into()],
            scope_id: scope_id.into(),
            node: None,
        }
    }

    /// `target.operator()`.
    pub fn unary_op(
        target_type: TypeId,
        target_var: impl Into<String>,
        operator: impl Into<String>,
        scope_id: impl Into<String>,
    ) -> Self {
        Self {
            shape: CallShape::UnaryOp,
            target_type,
            target_var: target_var.into(),
            name: operator.into(),
            arg_types: SmallVec::new(),
            arg_vars: SmallVec::new(),
            scope_id: scope_id.into(),
            node: None,
        }
    }

    /// A general method or function call with N arguments.
    ///
    /// # Panics
    /// Panics if the argument-type and argument-variable lists differ in
    /// length; that is an internal-consistency error.
    pub fn call(
        target_type: TypeId,
        target_var: impl Into<String>,
        name: impl Into<String>,
        arg_types: impl IntoIterator<Item = TypeId>,
        arg_vars: impl IntoIterator<Item = String>,
        scope_id: impl Into<String>,
    ) -> Self {
        let arg_types: SmallVec<[TypeId; 2]> = arg_types.into_iter().collect();
        let arg_vars: SmallVec<[String; 2]> = arg_vars.into_iter().collect();
        assert_eq!(
            arg_types.len(),
            arg_vars.len(),
            "ICE: argument type/variable lists differ in length"
        );
        Self {
            shape: CallShape::Call,
            target_type,
            target_var: target_var.into(),
            name: name.into(),
            arg_types,
            arg_vars,
            scope_id: scope_id.into(),
            node: None,
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn arity(&self) -> usize {
        self.arg_types.len()
    }
}
