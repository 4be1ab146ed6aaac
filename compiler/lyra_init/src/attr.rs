//! The `init` and `builtin_init` attributes.
//!
//! One validator serves both attribute names; each instance is bound to
//! its own persistent index and phase. The builtin phase additionally
//! runs imported entries eagerly (see [`AttributeImpl::after_import`]).

use std::sync::Arc;

use parking_lot::RwLock;

use lyra_attr::{
    AttrContext, AttrError, AttributeImpl, AttributeRegistry, Entry, IndexError, PersistentIndex,
};
use lyra_ir::{AttrArg, Environment, ModuleId, Name};

use crate::errors::{InitRunError, InitTypeError};

/// Source-level name of the regular-phase attribute.
pub const INIT_ATTR_NAME: &str = "init";
/// Source-level name of the builtin-phase attribute.
pub const BUILTIN_INIT_ATTR_NAME: &str = "builtin_init";

/// One phase's initialization attribute.
///
/// The payload of a registration is `Option<Name>`: `None` means the
/// declaration is its own initializer, `Some(target)` means `target`
/// runs instead. The `RwLock` is the single logical state reference for
/// all mutation; committed arrays are immutable snapshots and leave the
/// lock before anyone runs them.
pub struct InitAttr {
    name: &'static str,
    descr: &'static str,
    builtin: bool,
    state: RwLock<PersistentIndex<Option<Name>>>,
}

impl InitAttr {
    fn new(name: &'static str, descr: &'static str, builtin: bool) -> Self {
        InitAttr {
            name,
            descr,
            builtin,
            state: RwLock::new(PersistentIndex::new()),
        }
    }

    /// The regular-phase attribute, `@[init]`.
    pub fn regular() -> Self {
        InitAttr::new(
            INIT_ATTR_NAME,
            "initialization procedure for global references",
            false,
        )
    }

    /// The builtin-phase attribute, `@[builtin_init]`; its initializers
    /// run eagerly when the exposing module is imported.
    pub fn builtin() -> Self {
        InitAttr::new(
            BUILTIN_INIT_ATTR_NAME,
            "initialization procedure for builtin global references",
            true,
        )
    }

    /// Whether this is the builtin (eager) phase.
    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// The registered payload for `decl`, if tagged in this phase.
    pub fn param(&self, env: &Environment, decl: &Name) -> Option<Option<Name>> {
        self.state.read().get_param(env, decl).cloned()
    }

    /// Whether `decl` is tagged in this phase.
    pub fn contains(&self, env: &Environment, decl: &Name) -> bool {
        self.state.read().contains(env, decl)
    }

    /// The name of the initializer that runs for `decl`: `decl` itself
    /// when it is its own initializer, otherwise the explicit target.
    pub fn init_fn_name_for(&self, env: &Environment, decl: &Name) -> Option<Name> {
        match self.param(env, decl)? {
            Some(target) => Some(target),
            None => Some(decl.clone()),
        }
    }

    /// Whether `decl` is tagged in this phase as its own `IO Unit`
    /// initializer.
    pub fn is_io_unit_init_fn(&self, env: &Environment, decl: &Name) -> bool {
        matches!(self.param(env, decl), Some(None))
    }

    /// This phase's committed array for `module`, for serialization
    /// alongside the module's metadata.
    pub fn exported_entries(&self, module: ModuleId) -> Option<Arc<[Entry<Option<Name>>]>> {
        self.state.read().exported_entries(module)
    }

    /// Install a reloaded array for `module`, verbatim.
    pub fn import_module(
        &self,
        module: ModuleId,
        entries: Vec<Entry<Option<Name>>>,
    ) -> Result<(), IndexError> {
        self.state.write().import_module(module, entries)
    }

    /// Decide the payload for one application, or fail before anything
    /// mutates.
    fn validate(
        &self,
        ctx: &mut AttrContext<'_>,
        decl: &Name,
        arg: Option<&AttrArg>,
    ) -> Result<Option<Name>, AttrError> {
        let decl_ty = const_ty(ctx.env, decl)?;
        match arg {
            None => {
                if !decl_ty.is_io_unit() {
                    return Err(AttrError::apply(self.name, InitTypeError::ExpectedIoUnit));
                }
                Ok(None)
            }
            Some(AttrArg::Ident(ident)) => {
                let target = ctx.resolver.resolve_global_const(ctx.env, ident)?;
                let target_ty = const_ty(ctx.env, &target)?;
                let Some(arg_ty) = target_ty.as_io_app() else {
                    return Err(AttrError::apply(
                        self.name,
                        InitTypeError::ExpectedIoApp { target },
                    ));
                };
                if !decl_ty.quick_eq(arg_ty) {
                    return Err(AttrError::apply(
                        self.name,
                        InitTypeError::ArgTypeMismatch { target },
                    ));
                }
                Ok(Some(target))
            }
            Some(other) => Err(AttrError::UnexpectedArgKind {
                attr: self.name.into(),
                kind: other.kind(),
            }),
        }
    }

    fn run_failure(&self, decl: &Name, source: lyra_ir::EvalFailure) -> AttrError {
        AttrError::apply(
            self.name,
            InitRunError::InitializationFailure {
                decl: decl.clone(),
                source,
            },
        )
    }
}

fn const_ty(env: &Environment, name: &Name) -> Result<lyra_ir::Ty, AttrError> {
    match env.const_info(name) {
        Some(info) => Ok(info.ty.clone()),
        None => Err(AttrError::Env(lyra_ir::EnvError::UnknownConst {
            name: name.clone(),
        })),
    }
}

impl AttributeImpl for InitAttr {
    fn name(&self) -> &str {
        self.name
    }

    fn descr(&self) -> &str {
        self.descr
    }

    fn apply(
        &self,
        ctx: &mut AttrContext<'_>,
        decl: &Name,
        arg: Option<&AttrArg>,
        _persistent: bool,
    ) -> Result<(), AttrError> {
        // Every check happens before set_param: a failure leaves no
        // partial registration behind.
        let param = self.validate(ctx, decl, arg)?;
        self.state.write().set_param(decl.clone(), param)?;
        tracing::debug!(attr = self.name, decl = %decl, "registered initializer");
        Ok(())
    }

    fn after_import(
        &self,
        ctx: &mut AttrContext<'_>,
        module: ModuleId,
    ) -> Result<(), AttrError> {
        if !self.builtin {
            return Ok(());
        }
        // Snapshot the committed array so no lock is held while running
        // arbitrary initializer effects.
        let Some(entries) = self.state.read().exported_entries(module) else {
            return Ok(());
        };
        for entry in entries.iter() {
            let init_fn = entry.value.clone().unwrap_or_else(|| entry.name.clone());
            tracing::trace!(decl = %entry.name, init_fn = %init_fn, "running builtin initializer at import");
            let action = ctx
                .evaluator
                .eval_closed_const(ctx.env, &init_fn)
                .map_err(|source| self.run_failure(&entry.name, source))?;
            action
                .run()
                .map_err(|source| self.run_failure(&entry.name, source))?;
        }
        Ok(())
    }

    fn commit_module(&self, module: ModuleId) -> Result<(), AttrError> {
        self.state.write().commit_module(module)?;
        Ok(())
    }
}

/// Handles to the two registered phases.
pub struct InitAttrs {
    /// The `@[init]` (lazy, regular-phase) attribute.
    pub regular: Arc<InitAttr>,
    /// The `@[builtin_init]` (eager) attribute.
    pub builtin: Arc<InitAttr>,
}

impl std::fmt::Debug for InitAttrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitAttrs")
            .field("regular", &self.regular.name())
            .field("builtin", &self.builtin.name())
            .finish()
    }
}

impl InitAttrs {
    /// Whether `decl` carries either initialization attribute. The
    /// builtin index is probed first.
    pub fn has_init_attr(&self, env: &Environment, decl: &Name) -> bool {
        self.builtin.contains(env, decl) || self.regular.contains(env, decl)
    }

    /// The initializer that runs for `decl`, from whichever phase tags
    /// it (builtin probed first).
    pub fn init_fn_name_for(&self, env: &Environment, decl: &Name) -> Option<Name> {
        self.builtin
            .init_fn_name_for(env, decl)
            .or_else(|| self.regular.init_fn_name_for(env, decl))
    }
}

/// Register both initialization attributes into `registry` and return
/// the handle pair.
pub fn register_init_attrs(registry: &mut AttributeRegistry) -> Result<InitAttrs, AttrError> {
    let regular = Arc::new(InitAttr::regular());
    let builtin = Arc::new(InitAttr::builtin());
    registry.register(Arc::clone(&regular) as Arc<dyn AttributeImpl>)?;
    registry.register(Arc::clone(&builtin) as Arc<dyn AttributeImpl>)?;
    Ok(InitAttrs { regular, builtin })
}
