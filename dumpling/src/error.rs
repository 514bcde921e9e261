//! Error types for the dump engine.
//!
//! Only setup-stage problems surface to the caller: a failing output sink or
//! a registry splice against an unknown anchor id. Everything that goes wrong
//! while visiting a node (unreadable member, unrepresentable value) is
//! recovered locally into a diagnostic marker so a single bad leaf never
//! aborts the dump.

use thiserror::Error;

/// Error returned by dump entry points.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The caller-provided output sink rejected a write.
    #[error("failed to write to output sink")]
    Sink(#[from] std::fmt::Error),
}

/// Error raised when mutating a [`VisitorRegistry`](crate::VisitorRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A positional insert referenced an id that is not registered.
    #[error("unknown visitor id `{0}`")]
    UnknownId(String),
    /// An insert would shadow an already-registered id.
    #[error("visitor id `{0}` is already registered")]
    DuplicateId(String),
}

/// Failure to read a member value through its deferred accessor.
///
/// Always recovered into a null-literal-plus-comment marker; never
/// propagated past the member's own emission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The accessor was invoked against a value of the wrong concrete type.
    #[error("value is not a `{expected}`")]
    TypeMismatch {
        /// The type the accessor was registered for.
        expected: &'static str,
    },
    /// The accessor itself reported a failure.
    #[error("{0}")]
    Failed(String),
}
