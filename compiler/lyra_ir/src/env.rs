//! The compilation environment: modules, constants, and the open-module
//! lifecycle.
//!
//! An [`Environment`] holds exactly the import closure of the session:
//! every module visible in it is reachable from the module currently being
//! compiled. Compilation is strictly sequential - at most one module is
//! open (accepting declarations) at any time.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::{ModuleId, ModuleInfo, Name, Ty};

/// A global declaration's record.
#[derive(Clone, Debug)]
pub struct ConstInfo {
    /// Fully qualified declaration name.
    pub name: Name,
    /// The declaration's type.
    pub ty: Ty,
    /// The module that owns the declaration.
    pub module: ModuleId,
}

/// Environment lifecycle errors. These indicate misuse by the driver, not
/// user-facing diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvError {
    /// `begin_module`/`import_module` while another module is open.
    ModuleAlreadyOpen { open: Name, requested: Name },
    /// `add_const`/`end_module` with no module open.
    NoOpenModule,
    /// A declaration with this name already exists in the environment.
    DuplicateConst { name: Name },
    /// A declaration was looked up that the environment does not contain.
    UnknownConst { name: Name },
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::ModuleAlreadyOpen { open, requested } => write!(
                f,
                "cannot open module '{requested}': module '{open}' is still being compiled"
            ),
            EnvError::NoOpenModule => write!(f, "no module is being compiled"),
            EnvError::DuplicateConst { name } => {
                write!(f, "declaration '{name}' already exists")
            }
            EnvError::UnknownConst { name } => write!(f, "unknown declaration '{name}'"),
        }
    }
}

impl std::error::Error for EnvError {}

/// Modules and constants of one compilation session.
#[derive(Debug, Default)]
pub struct Environment {
    modules: Vec<ModuleInfo>,
    consts: FxHashMap<Name, ConstInfo>,
    open: Option<ModuleId>,
}

impl Environment {
    /// An empty environment.
    pub fn new() -> Self {
        Environment::default()
    }

    /// Open a new module for compilation. Fails if another module is open.
    pub fn begin_module(&mut self, name: Name) -> Result<ModuleId, EnvError> {
        if let Some(open) = self.open {
            return Err(EnvError::ModuleAlreadyOpen {
                open: self.modules[open.index()].name.clone(),
                requested: name,
            });
        }
        let id = self.push_module(ModuleInfo::new(name));
        self.open = Some(id);
        Ok(id)
    }

    /// Register a declaration into the open module.
    pub fn add_const(&mut self, name: Name, ty: Ty) -> Result<(), EnvError> {
        let module = self.open.ok_or(EnvError::NoOpenModule)?;
        if self.consts.contains_key(&name) {
            return Err(EnvError::DuplicateConst { name });
        }
        self.modules[module.index()].decls.push(name.clone());
        self.consts.insert(
            name.clone(),
            ConstInfo { name, ty, module },
        );
        Ok(())
    }

    /// Close the open module. The module's declaration list is final from
    /// here on.
    pub fn end_module(&mut self) -> Result<ModuleId, EnvError> {
        let id = self.open.take().ok_or(EnvError::NoOpenModule)?;
        Ok(id)
    }

    /// Install an already-compiled module and its declarations, as when
    /// loading compiled-module metadata. Not allowed while a module is open.
    pub fn import_module(
        &mut self,
        name: Name,
        decls: Vec<(Name, Ty)>,
    ) -> Result<ModuleId, EnvError> {
        if let Some(open) = self.open {
            return Err(EnvError::ModuleAlreadyOpen {
                open: self.modules[open.index()].name.clone(),
                requested: name,
            });
        }
        for (decl, _) in &decls {
            if self.consts.contains_key(decl) {
                return Err(EnvError::DuplicateConst { name: decl.clone() });
            }
        }
        let id = self.push_module(ModuleInfo::new(name));
        for (decl, ty) in decls {
            self.modules[id.index()].decls.push(decl.clone());
            self.consts.insert(
                decl.clone(),
                ConstInfo {
                    name: decl,
                    ty,
                    module: id,
                },
            );
        }
        Ok(id)
    }

    /// The module currently being compiled, if any.
    pub fn current_module(&self) -> Option<ModuleId> {
        self.open
    }

    /// Look up a declaration.
    pub fn const_info(&self, name: &Name) -> Option<&ConstInfo> {
        self.consts.get(name)
    }

    /// The module that owns `name`.
    pub fn owner_module(&self, name: &Name) -> Option<ModuleId> {
        self.consts.get(name).map(|info| info.module)
    }

    /// Metadata of a module minted by this environment.
    pub fn module(&self, id: ModuleId) -> &ModuleInfo {
        &self.modules[id.index()]
    }

    /// All modules, in creation order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleId, &ModuleInfo)> {
        self.modules.iter().enumerate().map(|(i, info)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "module count is bounded by ModuleId's u32 range"
            )]
            let id = ModuleId::new(i as u32);
            (id, info)
        })
    }

    /// All declarations, in no particular order.
    pub fn constants(&self) -> impl Iterator<Item = &ConstInfo> {
        self.consts.values()
    }

    fn push_module(&mut self, info: ModuleInfo) -> ModuleId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "module count is bounded by ModuleId's u32 range"
        )]
        let id = ModuleId::new(self.modules.len() as u32);
        self.modules.push(info);
        id
    }
}
