//! The persistent index: one attribute's view of the whole program.
//!
//! While a module compiles, its registrations accumulate in a mutable
//! pending table. At commit the table is folded into an immutable array,
//! sorted once, and from then on only binary-searched. A query never
//! materializes the merged view; it routes to the one table that can
//! contain the name.
//!
//! # Driver contract
//!
//! `commit_module` is called after the environment's module is closed
//! (`end_module`), so a name's owner being the *open* module implies its
//! entry can only live in the pending table.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

use lyra_ir::{Environment, ModuleId, Name};

use crate::sorted::{search_by_name, sort_by_name};

/// One registration: a declaration and the attribute's payload for it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<T> {
    /// The tagged declaration.
    pub name: Name,
    /// Attribute-specific data.
    pub value: T,
}

/// Errors raised by [`PersistentIndex`] mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexError {
    /// The declaration is already registered in this attribute, in the
    /// pending table or in any committed module.
    DuplicateDeclaration { name: Name },
    /// The module already has a committed array in this attribute.
    ModuleRecommitted { module: ModuleId },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::DuplicateDeclaration { name } => {
                write!(f, "declaration '{name}' already has this attribute")
            }
            IndexError::ModuleRecommitted { module } => {
                write!(f, "module {module:?} already has a committed index")
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// Per-attribute persistent state: the open module's pending table plus
/// one committed, sorted, immutable array per finished module.
#[derive(Debug)]
pub struct PersistentIndex<T> {
    pending: FxHashMap<Name, T>,
    /// Slot per `ModuleId`; `None` until that module commits or imports.
    committed: Vec<Option<Arc<[Entry<T>]>>>,
}

impl<T> Default for PersistentIndex<T> {
    fn default() -> Self {
        PersistentIndex {
            pending: FxHashMap::default(),
            committed: Vec::new(),
        }
    }
}

impl<T> PersistentIndex<T> {
    /// An index with no registrations.
    pub fn new() -> Self {
        PersistentIndex::default()
    }

    /// Register `value` for `name` in the open module.
    ///
    /// Fails if `name` is already registered anywhere in the merged view -
    /// the pending table or any committed module (the environment holds
    /// exactly the import closure, so every committed slot is reachable).
    pub fn set_param(&mut self, name: Name, value: T) -> Result<(), IndexError> {
        if self.is_registered_anywhere(&name) {
            return Err(IndexError::DuplicateDeclaration { name });
        }
        tracing::trace!(name = %name, "attribute registration pending");
        self.pending.insert(name, value);
        Ok(())
    }

    /// Look up `name`'s payload.
    ///
    /// If `name`'s owner is the module currently compiling, only the
    /// pending table can contain it (exact hash lookup); otherwise the
    /// owner's committed array is binary-searched. `None` if the
    /// declaration is unknown or untagged.
    pub fn get_param(&self, env: &Environment, name: &Name) -> Option<&T> {
        let owner = env.owner_module(name)?;
        if env.current_module() == Some(owner) {
            return self.pending.get(name);
        }
        let slot = self.committed.get(owner.index())?.as_deref()?;
        let at = search_by_name(slot, name)?;
        Some(&slot[at].value)
    }

    /// Whether `name` is registered, by the same routing as [`get_param`].
    ///
    /// [`get_param`]: PersistentIndex::get_param
    pub fn contains(&self, env: &Environment, name: &Name) -> bool {
        self.get_param(env, name).is_some()
    }

    /// Fold the pending table into the committed array for `module`.
    ///
    /// The fold order is irrelevant: the array is sorted here, exactly
    /// once; afterwards it is immutable for the life of the session.
    pub fn commit_module(&mut self, module: ModuleId) -> Result<(), IndexError> {
        if self.slot(module).is_some() {
            return Err(IndexError::ModuleRecommitted { module });
        }
        let mut entries: Vec<Entry<T>> = self
            .pending
            .drain()
            .map(|(name, value)| Entry { name, value })
            .collect();
        sort_by_name(&mut entries);
        tracing::debug!(?module, count = entries.len(), "committed attribute index");
        self.install(module, entries.into());
        Ok(())
    }

    /// Install a previously exported array for `module`, verbatim.
    ///
    /// The array was sorted by its producer and is **not** re-sorted on
    /// load. Entries colliding with already-visible registrations are
    /// rejected.
    pub fn import_module(
        &mut self,
        module: ModuleId,
        entries: Vec<Entry<T>>,
    ) -> Result<(), IndexError> {
        if self.slot(module).is_some() {
            return Err(IndexError::ModuleRecommitted { module });
        }
        debug_assert!(
            entries.windows(2).all(|w| w[0].name <= w[1].name),
            "imported attribute index must arrive sorted"
        );
        for entry in &entries {
            if self.is_registered_anywhere(&entry.name) {
                return Err(IndexError::DuplicateDeclaration {
                    name: entry.name.clone(),
                });
            }
        }
        tracing::debug!(?module, count = entries.len(), "imported attribute index");
        self.install(module, entries.into());
        Ok(())
    }

    /// The committed array for `module`: the persisted layout, one sorted
    /// array per attribute per module.
    pub fn exported_entries(&self, module: ModuleId) -> Option<Arc<[Entry<T>]>> {
        self.slot(module).cloned()
    }

    /// Number of registrations awaiting commit.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn is_registered_anywhere(&self, name: &Name) -> bool {
        self.pending.contains_key(name)
            || self
                .committed
                .iter()
                .flatten()
                .any(|slot| search_by_name(slot, name).is_some())
    }

    fn slot(&self, module: ModuleId) -> Option<&Arc<[Entry<T>]>> {
        self.committed.get(module.index()).and_then(Option::as_ref)
    }

    fn install(&mut self, module: ModuleId, entries: Arc<[Entry<T>]>) {
        if self.committed.len() <= module.index() {
            self.committed.resize_with(module.index() + 1, || None);
        }
        self.committed[module.index()] = Some(entries);
    }
}

#[cfg(test)]
mod tests;
