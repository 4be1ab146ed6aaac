//! Error taxonomy of the init attributes.
//!
//! [`InitTypeError`] is compile-time: it aborts the attribute application
//! (and the module being compiled) before anything is registered.
//! [`InitRunError`] is runtime: it aborts the remaining initializers of
//! the module whose startup failed, and effects already performed stay.

use std::fmt;

use lyra_ir::{EvalFailure, Name};

/// Type-shape violations detected when the attribute is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitTypeError {
    /// Bare `@[init]` on a declaration whose type is not `IO Unit`.
    ExpectedIoUnit,
    /// `@[init fn]` where `fn`'s type is not of the form `IO <type>`.
    ExpectedIoApp { target: Name },
    /// `@[init fn]` where `fn : IO t` but the declaration's type is not
    /// structurally equivalent to `t`.
    ArgTypeMismatch { target: Name },
}

impl fmt::Display for InitTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitTypeError::ExpectedIoUnit => {
                write!(f, "initialization function must have type `IO Unit`")
            }
            InitTypeError::ExpectedIoApp { target } => write!(
                f,
                "initialization function '{target}' must have type of the form `IO <type>`"
            ),
            InitTypeError::ArgTypeMismatch { target } => {
                write!(f, "initialization function '{target}' type mismatch")
            }
        }
    }
}

impl std::error::Error for InitTypeError {}

/// A failure while executing a resolved initializer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitRunError {
    /// The initializer for `decl` raised `source`. Initializers that ran
    /// before it are not undone; initializers after it do not run.
    InitializationFailure { decl: Name, source: EvalFailure },
}

impl fmt::Display for InitRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitRunError::InitializationFailure { decl, source } => {
                write!(f, "initialization of '{decl}' failed: {source}")
            }
        }
    }
}

impl std::error::Error for InitRunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InitRunError::InitializationFailure { source, .. } => Some(source),
        }
    }
}
