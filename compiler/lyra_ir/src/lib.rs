//! Lyra IR - core data types for the Lyra compiler.
//!
//! This crate contains the data model shared by the attribute subsystem:
//! - Hierarchical declaration names with a fixed total order
//! - Modules, constants and the compilation `Environment`
//! - The opaque type representation and its shape probes
//! - Narrow traits for the name resolver and the constant evaluator
//!
//! # Design Philosophy
//!
//! - **Share, don't copy**: names and types are reference-counted; cloning
//!   a `Name` or a `Ty` is O(1).
//! - **One order everywhere**: `Name`'s `Ord` impl is the "quick" order used
//!   for every sorted array and every binary search in the compiler. There
//!   is no second comparator to drift out of sync.
//! - **Interfaces at the seams**: overload resolution and evaluation are
//!   consumed through `GlobalResolver` and `ConstEvaluator`, keeping this
//!   subsystem independent of the elaborator and the runtime.

mod env;
mod eval;
mod module;
mod name;
mod resolve;
mod syntax;
mod ty;

pub use env::{ConstInfo, EnvError, Environment};
pub use eval::{ConstEvaluator, EvalFailure, IoAction};
pub use module::{ModuleId, ModuleInfo};
pub use name::{Name, NamePart};
pub use resolve::{GlobalResolver, PathResolver, ResolveError};
pub use syntax::AttrArg;
pub use ty::Ty;
