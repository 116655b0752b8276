//! Well-known method and type names used by synthesized calls.

/// Synthesized instance-initialization method invoked by constructor calls.
pub const INIT: &str = "_init";

/// Fixed entry point invoked on a materialized function-instance value.
pub const CALL: &str = "_call";

/// The designated promotion operator a type may define.
pub const PROMOTE: &str = "_promote";

/// Extracts a primitive boolean from a boxed boolean.
pub const IS_TRUE: &str = "_true";

/// Tests whether a value is set (non-unset).
pub const IS_SET: &str = "_isSet";

/// Boolean negation.
pub const NOT: &str = "_not";

/// Boolean conjunction, invoked by the short-circuit AND block.
pub const AND: &str = "_and";

/// Boolean disjunction, invoked by the short-circuit OR block.
pub const OR: &str = "_or";

/// Unary increment operator.
pub const INCREMENT: &str = "++";

/// Unary decrement operator.
pub const DECREMENT: &str = "--";

/// Boxed boolean type name.
pub const BOOLEAN: &str = "Boolean";

/// Return-type name used for callables that produce no value.
pub const VOID: &str = "Void";

/// Return-type name for primitive (unboxed, value-typed) booleans.
///
/// Primitive booleans are never retained or scope-registered.
pub const PRIM_BOOL: &str = "bool";
