//! Error types for IR generation.
//!
//! Every error here is an internal compiler error: semantic analysis has
//! already rejected user-level mistakes by the time this phase runs, so any
//! failure below indicates a defect in the compiler, not in the source
//! program. Nothing is recovered locally; errors abort generation of the
//! current compilation unit.

use derive_more::{Display, From};

pub type IrGenResult<T> = Result<T, IrGenError>;

#[derive(Display, Debug, From)]
#[display("internal compiler error: {kind}")]
pub struct IrGenError {
    #[from]
    kind: Box<IrGenErrorKind>,
}

impl<E> From<E> for IrGenError
where
    IrGenErrorKind: From<E>,
{
    fn from(error: E) -> Self {
        IrGenError {
            kind: Box::new(IrGenErrorKind::from(error)),
        }
    }
}

impl IrGenError {
    pub(crate) fn unresolved(name: impl Into<String>, target_type: impl Into<String>) -> Self {
        IrGenErrorKind::UnresolvedCallable {
            name: name.into(),
            target_type: target_type.into(),
        }
        .into()
    }

    pub(crate) fn ambiguous(
        name: impl Into<String>,
        target_type: impl Into<String>,
        count: usize,
    ) -> Self {
        IrGenErrorKind::AmbiguousResolution {
            name: name.into(),
            target_type: target_type.into(),
            count,
        }
        .into()
    }

    pub(crate) fn promotion_impossible(
        arg: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        IrGenErrorKind::PromotionImpossible {
            arg: arg.into(),
            from: from.into(),
            to: to.into(),
        }
        .into()
    }

    pub(crate) fn shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        IrGenErrorKind::ShapeError {
            expected: expected.into(),
            found: found.into(),
        }
        .into()
    }

    pub(crate) fn missing_well_known_type(name: &'static str) -> Self {
        IrGenErrorKind::MissingWellKnownType(name).into()
    }
}

#[derive(Display, Debug)]
pub enum IrGenErrorKind {
    #[display("unresolved callable '{name}' on type '{target_type}'")]
    UnresolvedCallable { name: String, target_type: String },

    #[display("ambiguous resolution for '{name}' on type '{target_type}': {count} equally ranked candidates")]
    AmbiguousResolution {
        name: String,
        target_type: String,
        count: usize,
    },

    #[display("no single-step promotion from '{from}' to '{to}' for argument '{arg}'")]
    PromotionImpossible {
        arg: String,
        from: String,
        to: String,
    },

    #[display("resolved symbol has wrong shape: expected {expected}, found {found}")]
    ShapeError { expected: String, found: String },

    #[display("well-known type '{_0}' missing from the symbol table")]
    MissingWellKnownType(&'static str),
}

impl std::error::Error for IrGenError {}
