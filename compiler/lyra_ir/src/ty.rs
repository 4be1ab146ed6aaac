//! The type representation, as far as the attribute subsystem can see it.
//!
//! Types are opaque terms to this subsystem: constants, applications and
//! arrows over shared subterms. The only structure the init validator ever
//! inspects is the `IO Unit` / `IO <type>` application shape, exposed
//! through [`Ty::is_io_unit`] and [`Ty::as_io_app`].
//!
//! # Known limitation
//!
//! [`Ty::quick_eq`] is a cheap structural equivalence with a pointer
//! fast path - it is **not** definitional equality. Two types that are
//! equal only after unfolding definitions compare as different and are
//! reported as a type mismatch by the init validator.

use std::fmt;
use std::sync::Arc;

use crate::{Name, NamePart};

/// A type term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Ty {
    /// A reference to a named type constant.
    Const(Name),
    /// Application of a type to an argument.
    App(Arc<Ty>, Arc<Ty>),
    /// Function type.
    Arrow(Arc<Ty>, Arc<Ty>),
}

impl Ty {
    /// A named type constant.
    pub fn constant(name: Name) -> Ty {
        Ty::Const(name)
    }

    /// Apply `fun` to `arg`.
    pub fn app(fun: Ty, arg: Ty) -> Ty {
        Ty::App(Arc::new(fun), Arc::new(arg))
    }

    /// The function type `from -> to`.
    pub fn arrow(from: Ty, to: Ty) -> Ty {
        Ty::Arrow(Arc::new(from), Arc::new(to))
    }

    /// The `IO` type constructor.
    pub fn io() -> Ty {
        Ty::Const(Name::root("IO"))
    }

    /// The effectful action type `IO arg`.
    pub fn io_of(arg: Ty) -> Ty {
        Ty::app(Ty::io(), arg)
    }

    /// The nullary effectful action type `IO Unit`.
    pub fn io_unit() -> Ty {
        Ty::io_of(Ty::Const(Name::root("Unit")))
    }

    /// Exactly the application `IO Unit`.
    pub fn is_io_unit(&self) -> bool {
        match self.as_io_app() {
            Some(arg) => arg.is_const_named("Unit"),
            None => false,
        }
    }

    /// If this is `IO <arg>`, the argument type.
    pub fn as_io_app(&self) -> Option<&Ty> {
        match self {
            Ty::App(fun, arg) if fun.is_const_named("IO") => Some(arg),
            _ => None,
        }
    }

    /// Cheap structural equivalence with a pointer fast path on shared
    /// subterms. See the module docs: this is not definitional equality.
    pub fn quick_eq(&self, other: &Ty) -> bool {
        match (self, other) {
            (Ty::Const(a), Ty::Const(b)) => a == b,
            (Ty::App(f1, a1), Ty::App(f2, a2)) | (Ty::Arrow(f1, a1), Ty::Arrow(f2, a2)) => {
                shared_quick_eq(f1, f2) && shared_quick_eq(a1, a2)
            }
            _ => false,
        }
    }

    fn is_const_named(&self, expected: &str) -> bool {
        match self {
            Ty::Const(name) => {
                matches!(name.parts(), [NamePart::Str(s)] if &**s == expected)
            }
            _ => false,
        }
    }
}

fn shared_quick_eq(a: &Arc<Ty>, b: &Arc<Ty>) -> bool {
    Arc::ptr_eq(a, b) || a.quick_eq(b)
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Const(name) => write!(f, "{name}"),
            Ty::App(fun, arg) => {
                write!(f, "{fun} ")?;
                match **arg {
                    Ty::Const(_) => write!(f, "{arg}"),
                    _ => write!(f, "({arg})"),
                }
            }
            Ty::Arrow(from, to) => {
                match **from {
                    Ty::Arrow(_, _) => write!(f, "({from})")?,
                    _ => write!(f, "{from}")?,
                }
                write!(f, " -> {to}")
            }
        }
    }
}
