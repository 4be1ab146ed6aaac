//! Module identifiers and per-module metadata.

use crate::Name;
use std::fmt;

/// Dense index of a compiled module within one [`Environment`] session.
///
/// Ids are minted by [`Environment::begin_module`] / `import_module` and are
/// only meaningful inside the environment that created them.
///
/// [`Environment`]: crate::Environment
/// [`Environment::begin_module`]: crate::Environment::begin_module
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    /// Create from a raw index.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ModuleId(raw)
    }

    /// The raw index, for slot-per-module storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

/// Per-module metadata.
#[derive(Clone, Debug)]
pub struct ModuleInfo {
    /// The module's name.
    pub name: Name,
    /// Declarations owned by this module, in declared source order.
    /// Startup execution walks this list front to back.
    pub decls: Vec<Name>,
}

impl ModuleInfo {
    /// A module with no declarations yet.
    pub fn new(name: Name) -> Self {
        ModuleInfo {
            name,
            decls: Vec::new(),
        }
    }
}
