//! The session-owned attribute catalog.

use std::sync::Arc;

use lyra_ir::{AttrArg, ModuleId, Name};

use crate::{AttrContext, AttrError};

/// One attribute's behavior: validation and application of the tag, plus
/// optional lifecycle hooks.
///
/// Implementations are registered once per compiler session and shared
/// behind `Arc`, so any mutable state they keep must be internally
/// synchronized.
pub trait AttributeImpl: Send + Sync {
    /// The attribute's name as written in source, e.g. `init`.
    fn name(&self) -> &str;

    /// One-line human-readable description.
    fn descr(&self) -> &str;

    /// Validate an application of this attribute to `decl` and record it.
    ///
    /// Runs inside the fallible elaboration context; an error aborts the
    /// application (and with it the module being compiled) with no partial
    /// registration. `persistent` distinguishes exported applications from
    /// module-local ones.
    fn apply(
        &self,
        ctx: &mut AttrContext<'_>,
        decl: &Name,
        arg: Option<&AttrArg>,
        persistent: bool,
    ) -> Result<(), AttrError>;

    /// Hook invoked once per imported module, for attributes with eager
    /// post-import behavior. Defaults to a no-op.
    fn after_import(
        &self,
        _ctx: &mut AttrContext<'_>,
        _module: ModuleId,
    ) -> Result<(), AttrError> {
        Ok(())
    }

    /// Hook invoked when a module finishes compiling; stateful attributes
    /// fold their pending table here. Defaults to a no-op.
    fn commit_module(&self, _module: ModuleId) -> Result<(), AttrError> {
        Ok(())
    }
}

/// Catalog of the attributes one compiler session understands.
///
/// Owned by the session and dropped with it. Registration is a linear
/// scan - the registry stays small, and O(n) keeps the happy path free of
/// auxiliary tables.
#[derive(Default)]
pub struct AttributeRegistry {
    attrs: Vec<Arc<dyn AttributeImpl>>,
}

impl AttributeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        AttributeRegistry::default()
    }

    /// Add an attribute. Fails if the name is taken.
    pub fn register(&mut self, attr: Arc<dyn AttributeImpl>) -> Result<(), AttrError> {
        if self.attrs.iter().any(|a| a.name() == attr.name()) {
            return Err(AttrError::DuplicateAttrName {
                attr: attr.name().into(),
            });
        }
        tracing::debug!(attr = attr.name(), "registered attribute");
        self.attrs.push(attr);
        Ok(())
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn AttributeImpl>> {
        self.attrs.iter().find(|a| a.name() == name).cloned()
    }

    /// Dispatch an attribute application to its implementation.
    ///
    /// Errors from the implementation propagate unchanged to the caller:
    /// the compilation of the module containing the tagged declaration.
    pub fn apply(
        &self,
        ctx: &mut AttrContext<'_>,
        attr: &str,
        decl: &Name,
        arg: Option<&AttrArg>,
        persistent: bool,
    ) -> Result<(), AttrError> {
        let Some(found) = self.get(attr) else {
            return Err(AttrError::UnknownAttr { attr: attr.into() });
        };
        tracing::debug!(attr, decl = %decl, "applying attribute");
        found.apply(ctx, decl, arg, persistent)
    }

    /// Tell every attribute that `module` finished compiling.
    pub fn commit_module(&self, module: ModuleId) -> Result<(), AttrError> {
        for attr in &self.attrs {
            attr.commit_module(module)?;
        }
        Ok(())
    }

    /// Run every attribute's post-import hook for `module`. The first
    /// error aborts the import.
    pub fn after_import(
        &self,
        ctx: &mut AttrContext<'_>,
        module: ModuleId,
    ) -> Result<(), AttrError> {
        for attr in &self.attrs {
            attr.after_import(ctx, module)?;
        }
        Ok(())
    }

    /// Number of registered attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether no attributes are registered.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
