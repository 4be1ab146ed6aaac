//! Global name resolution, consumed through a narrow trait.
//!
//! Overload disambiguation proper lives in the elaborator; the attribute
//! subsystem only needs "this identifier means exactly one global
//! constant, or it is an error".

use std::fmt;

use crate::{Environment, Name};

/// Why an identifier failed to resolve to one global constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// No global constant matches.
    Unknown { ident: Name },
    /// More than one global constant matches.
    Ambiguous { ident: Name, candidates: Vec<Name> },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Unknown { ident } => write!(f, "unknown constant '{ident}'"),
            ResolveError::Ambiguous { ident, candidates } => {
                write!(f, "ambiguous constant '{ident}' (candidates:")?;
                for c in candidates {
                    write!(f, " '{c}'")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolves an identifier to exactly one global constant.
pub trait GlobalResolver {
    /// Resolve `ident` in `env`. Ambiguity and absence are both errors;
    /// a successful resolution names a constant that `env` contains.
    fn resolve_global_const(
        &self,
        env: &Environment,
        ident: &Name,
    ) -> Result<Name, ResolveError>;
}

/// Stock resolver: an identifier resolves to the unique constant whose
/// fully qualified name it is a suffix of (`x` means `A.x` if no other
/// module declares an `x`). A fully qualified identifier always wins
/// outright.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathResolver;

impl GlobalResolver for PathResolver {
    fn resolve_global_const(
        &self,
        env: &Environment,
        ident: &Name,
    ) -> Result<Name, ResolveError> {
        if env.const_info(ident).is_some() {
            return Ok(ident.clone());
        }
        let mut candidates: Vec<Name> = env
            .constants()
            .filter(|info| info.name.ends_with(ident))
            .map(|info| info.name.clone())
            .collect();
        // Deterministic candidate order for diagnostics.
        candidates.sort();
        match candidates.len() {
            0 => Err(ResolveError::Unknown {
                ident: ident.clone(),
            }),
            1 => Ok(candidates.remove(0)),
            _ => Err(ResolveError::Ambiguous {
                ident: ident.clone(),
                candidates,
            }),
        }
    }
}
