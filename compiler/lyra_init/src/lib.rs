//! Initialization attributes for the Lyra compiler.
//!
//! Declarations whose initializer has side effects are tagged
//! `@[init]`, `@[init fn]`, `@[builtin_init]` or `@[builtin_init fn]`.
//! The attribute decides which of the two ordered startup phases the
//! initializer runs in, and gates the registration behind type-shape
//! checks:
//!
//! - `@[init]` on `d` requires `d : IO Unit`; `d` is its own initializer.
//! - `@[init fn]` on `d : t` requires `fn : IO t`; `fn` runs instead and
//!   its result becomes `d`'s value.
//!
//! Registrations live in one persistent index per phase and survive
//! separate compilation. The builtin phase is eager: importing a module
//! that exposes builtin-tagged declarations runs their initializers
//! immediately, while regular initializers wait for [`run_module_inits`].

mod attr;
mod errors;
mod run;

pub use attr::{
    register_init_attrs, InitAttr, InitAttrs, BUILTIN_INIT_ATTR_NAME, INIT_ATTR_NAME,
};
pub use errors::{InitRunError, InitTypeError};
pub use run::run_module_inits;

#[cfg(test)]
mod testing;
