//! The scope/frame stack tracked during generation.
//!
//! One frame per lexical region. Frames are pushed on entry and popped on
//! exit, never shared and never mutated after push. Upward scans are
//! pattern-matching folds over the stack, nearest frame first.

use veld_core::DebugInfo;

/// Aggregate flavors a frame can represent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AggregateKind {
    Class,
    Trait,
    Record,
}

/// What kind of lexical region a frame covers, with per-kind payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameKind {
    Module { name: String },
    Aggregate { name: String, kind: AggregateKind },
    Function { name: String },
    Method { name: String },
    Operator { symbol: String },
    Block,
    Expression,
    Call,
}

impl FrameKind {
    /// Function-like frames: the regions that own a body being generated.
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            FrameKind::Function { .. } | FrameKind::Method { .. } | FrameKind::Operator { .. }
        )
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(self, FrameKind::Aggregate { .. })
    }
}

/// One lexical region, identified by a unique scope id.
#[derive(Clone, Debug)]
pub struct ScopeFrame {
    pub id: String,
    pub kind: FrameKind,
    pub debug: Option<DebugInfo>,
    /// The left-hand-side binding target of the region, when the region
    /// lowers an assignment.
    pub lhs_target: Option<String>,
}

impl ScopeFrame {
    pub fn new(id: impl Into<String>, kind: FrameKind) -> Self {
        Self {
            id: id.into(),
            kind,
            debug: None,
            lhs_target: None,
        }
    }

    pub fn with_debug(mut self, debug: Option<DebugInfo>) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_lhs_target(mut self, target: impl Into<String>) -> Self {
        self.lhs_target = Some(target.into());
        self
    }

    pub fn has_lhs_target(&self) -> bool {
        self.lhs_target.is_some()
    }
}

/// The stack of frames for one compilation unit.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ScopeFrame) {
        self.frames.push(frame);
    }

    /// # Panics
    /// Panics if the stack is empty; that is an internal-consistency error,
    /// never a user-facing one.
    pub fn pop(&mut self) -> ScopeFrame {
        self.frames.pop().expect("ICE: pop on empty scope stack")
    }

    /// # Panics
    /// Panics if the stack is empty.
    pub fn peek(&self) -> &ScopeFrame {
        self.frames.last().expect("ICE: peek on empty scope stack")
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The id of the innermost frame.
    ///
    /// # Panics
    /// Panics if the stack is empty.
    pub fn current_scope_id(&self) -> &str {
        &self.peek().id
    }

    /// The nearest debug info attached to any enclosing frame.
    pub fn current_debug_info(&self) -> Option<&DebugInfo> {
        self.frames.iter().rev().find_map(|f| f.debug.as_ref())
    }

    /// The nearest enclosing frame matching `pred`, innermost first.
    pub fn find_enclosing(&self, pred: impl Fn(&ScopeFrame) -> bool) -> Option<&ScopeFrame> {
        self.frames.iter().rev().find(|f| pred(f))
    }

    /// The nearest enclosing frame of the same kind as `kind`, ignoring the
    /// kind's payload.
    pub fn find_enclosing_of_kind(&self, kind: &FrameKind) -> Option<&ScopeFrame> {
        let want = std::mem::discriminant(kind);
        self.find_enclosing(|f| std::mem::discriminant(&f.kind) == want)
    }

    /// The nearest enclosing function, method, or operator frame.
    pub fn find_enclosing_callable(&self) -> Option<&ScopeFrame> {
        self.find_enclosing(|f| f.kind.is_callable())
    }

    /// The nearest enclosing aggregate (class/trait/record) frame.
    pub fn find_enclosing_aggregate(&self) -> Option<&ScopeFrame> {
        self.find_enclosing(|f| f.kind.is_aggregate())
    }
}
