//! The runtime iteration helper shared by generated code and the materializer.
//!
//! The compiler prepends [`ITERATION_HELPER_SOURCE`] to any body that iterates.
//! The runtime recognizes that exact prelude and binds [`ITERATION_HELPER_NAME`]
//! natively instead of interpreting the declaration.

/// Identifier the generated code calls for every `each` loop.
pub const ITERATION_HELPER_NAME: &str = "_map";

/// Definition of the iteration helper, emitted at most once per body.
///
/// Array-likes (anything with a numeric `length`) are visited by position with
/// `(value, index)`; everything else by own keys with `(value, key)`.
pub const ITERATION_HELPER_SOURCE: &str = "function _map(obj, fn) {\n  \
if (typeof obj.length === \"number\") return [].map.call(obj, fn);\n  \
var keys = Object.keys(obj);\n  \
return keys.map(function (key) { return fn(obj[key], key); });\n\
}";

/// Default document nesting bound shared by the compiler and the runtime.
///
/// The compiler rejects documents nested deeper than this; the runtime sizes
/// its expression nesting bound from it.
pub const DEFAULT_NESTING_LIMIT: u32 = 512;
