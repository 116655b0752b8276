//! Unique-name generation.
//!
//! One monotonically increasing counter per distinct prefix, so names never
//! collide within a compilation unit. Each unit owns its own generator;
//! counters are atomic so helpers within one unit may share the generator
//! across threads.

use dashmap::DashMap;

/// Prefix marking a variable whose ownership transfers to the callee.
/// Such variables are never scope-registered.
pub const PARAM_PREFIX: &str = "_param_";

/// Prefix marking a return-transfer variable, owned by the caller.
/// Such variables are never scope-registered.
pub const RETURN_PREFIX: &str = "_rtn_";

const TEMP_PREFIX: &str = "temp";

/// Per-prefix unique-name counters for one compilation unit.
#[derive(Debug, Default)]
pub struct NameGenerator {
    counters: DashMap<String, u64>,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment-and-fetch the counter for `prefix`.
    fn next(&self, prefix: &str) -> u64 {
        let mut entry = self.counters.entry(prefix.to_owned()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// A fresh temporary result variable.
    pub fn temp_name(&self) -> String {
        format!("_temp_{}", self.next(TEMP_PREFIX))
    }

    /// A fresh scope identifier, e.g. `scope_id("scope")` -> `_scope_3`.
    pub fn scope_id(&self, prefix: &str) -> String {
        format!("_{}_{}", prefix, self.next(prefix))
    }

    /// A fresh block label; shares the counter of its prefix.
    pub fn block_label(&self, prefix: &str) -> String {
        format!("_{}_{}", prefix, self.next(prefix))
    }

    /// The name of a call-parameter variable. Carries [`PARAM_PREFIX`] so
    /// later phases can see the value is callee-owned.
    pub fn param_name(&self, base: &str) -> String {
        format!("{PARAM_PREFIX}{base}")
    }

    /// The name of a return-transfer variable. Carries [`RETURN_PREFIX`].
    pub fn return_name(&self, base: &str) -> String {
        format!("{RETURN_PREFIX}{base}")
    }

    /// Whether `name` marks a value whose ownership is caller- or
    /// callee-transferred rather than scope-owned.
    pub fn is_transfer_var(name: &str) -> bool {
        name.starts_with(PARAM_PREFIX) || name.starts_with(RETURN_PREFIX)
    }
}
