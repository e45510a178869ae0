//! Errors raised by dispatch, unification and the collection operations.
//!
//! Everything here is detected eagerly at the call site. Contract violations
//! (out-of-range `Tuple::at`, `Map::at_key` on a missing key) are not errors:
//! they panic, and `get`/`find`/`contains` are the checked alternatives.

use crate::String;
use crate::dispatch::Operation;

/// Error type for all dispatch and collection operations.
///
/// Tags are rendered to strings when the error is built, so errors carry no
/// arena lifetime and can outlive the `TagManager` that produced them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No override, guarded default or common type applies to the call.
    #[error("`{op}` is not supported for ({tags})")]
    Unsupported { op: Operation, tags: String },

    /// A cross-tag call could not unify its argument tags.
    #[error("no common type between {left} and {right}")]
    NoCommonType { left: String, right: String },

    /// A cross-tag comparison would need a lossy conversion.
    #[error("refusing `{op}` between {left} and {right}: conversion to {common} is not an embedding")]
    NotEmbedded {
        op: Operation,
        left: String,
        right: String,
        common: String,
    },

    /// `convert` has no route from one tag to the other.
    #[error("cannot convert {from} to {to}")]
    NoConversion { from: String, to: String },

    /// A value did not have the shape an operation required.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Too few arguments were supplied to an operation.
    #[error("`{op}` expects {expected} argument(s), got {found}")]
    Arity {
        op: Operation,
        expected: usize,
        found: usize,
    },

    /// Integer quotient or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Nested dispatch went deeper than `DispatchOptions::max_depth`.
    #[error("dispatch depth {depth} exceeds maximum of {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },
}

impl Error {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl core::fmt::Display) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: crate::format!("{}", found),
        }
    }
}
