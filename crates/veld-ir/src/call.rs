//! Resolved call descriptions embedded in the instruction stream.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use veld_core::SideEffect;

/// Metadata backends use to order, inline, and schedule a call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMetadata {
    pub pure: bool,
    pub complexity: u32,
    pub side_effects: BTreeSet<SideEffect>,
}

/// A fully resolved, backend-agnostic description of one concrete call.
///
/// All types appear by name; backends map names onto their own type
/// representations. A return type of `"Void"` means the call produces no
/// value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallDetails {
    /// The receiver variable, if the callable is invoked on a value.
    pub target_var: Option<String>,
    pub target_type: String,
    pub method: String,
    pub param_types: Vec<String>,
    pub return_type: String,
    /// Argument variables, after any promotions.
    pub args: Vec<String>,
    pub metadata: CallMetadata,
}

impl std::fmt::Display for CallDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target_var {
            Some(target) => write!(f, "{}.", target)?,
            None => write!(f, "{}::", self.target_type)?,
        }
        write!(f, "{}(", self.method)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, "): {}", self.return_type)
    }
}
