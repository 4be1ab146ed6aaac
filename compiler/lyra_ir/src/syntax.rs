//! Parsed attribute-application arguments.
//!
//! The elaborator hands attribute callbacks an already-parsed argument;
//! this subsystem never sees raw syntax trees.

use crate::Name;

/// The argument of an attribute application, e.g. the `cleanup` in
/// `@[init cleanup]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrArg {
    /// An identifier, to be resolved against the environment.
    Ident(Name),
    /// A numeric literal.
    Num(u64),
    /// A string literal.
    Str(Box<str>),
}

impl AttrArg {
    /// Human-readable kind, for "unexpected kind of argument" diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            AttrArg::Ident(_) => "identifier",
            AttrArg::Num(_) => "numeric literal",
            AttrArg::Str(_) => "string literal",
        }
    }
}
