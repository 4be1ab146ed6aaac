//! Attribute-engine errors.
//!
//! Everything here is a compile-time error: it is detected synchronously
//! at the point an attribute is registered or applied, and aborts the
//! module being compiled before any partial state commits.

use std::fmt;

use lyra_ir::{EnvError, ResolveError};

use crate::IndexError;

/// Errors raised while registering or applying attributes.
#[derive(Debug)]
pub enum AttrError {
    /// A second attribute was registered under an existing name.
    DuplicateAttrName { attr: Box<str> },
    /// An application named an attribute the registry does not know.
    UnknownAttr { attr: Box<str> },
    /// The attribute's argument is of a kind the attribute cannot use
    /// (e.g. a numeric literal where an identifier is required).
    UnexpectedArgKind { attr: Box<str>, kind: &'static str },
    /// Persistent-index mutation failed (duplicate registration, commit
    /// misuse).
    Index(IndexError),
    /// An identifier argument failed to resolve to one global constant.
    Resolve(ResolveError),
    /// Environment lookup or lifecycle failure.
    Env(EnvError),
    /// An attribute-specific validation failure, propagated unchanged
    /// from the attribute's own callback.
    Apply {
        attr: Box<str>,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AttrError {
    /// An [`AttrError::Apply`] wrapping an attribute-specific error.
    pub fn apply(
        attr: &str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AttrError::Apply {
            attr: attr.into(),
            source: Box::new(source),
        }
    }
}

impl fmt::Display for AttrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrError::DuplicateAttrName { attr } => {
                write!(f, "invalid attribute declaration, '{attr}' is already registered")
            }
            AttrError::UnknownAttr { attr } => write!(f, "unknown attribute '{attr}'"),
            AttrError::UnexpectedArgKind { .. } => write!(f, "unexpected kind of argument"),
            AttrError::Index(e) => write!(f, "{e}"),
            AttrError::Resolve(e) => write!(f, "{e}"),
            AttrError::Env(e) => write!(f, "{e}"),
            AttrError::Apply { source, .. } => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for AttrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttrError::Index(e) => Some(e),
            AttrError::Resolve(e) => Some(e),
            AttrError::Env(e) => Some(e),
            AttrError::Apply { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<IndexError> for AttrError {
    fn from(e: IndexError) -> Self {
        AttrError::Index(e)
    }
}

impl From<ResolveError> for AttrError {
    fn from(e: ResolveError) -> Self {
        AttrError::Resolve(e)
    }
}

impl From<EnvError> for AttrError {
    fn from(e: EnvError) -> Self {
        AttrError::Env(e)
    }
}
