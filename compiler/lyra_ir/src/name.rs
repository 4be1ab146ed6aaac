//! Hierarchical declaration names.
//!
//! A [`Name`] is an immutable, reference-counted sequence of components
//! (`Foo.Bar.baz`, `_private.3.go`). Cloning is O(1) and equality starts
//! with a pointer check, so names can be passed around freely.
//!
//! # The quick order
//!
//! `Ord for Name` is the compiler's *quick* order: names compare by
//! component count first, then component by component, with numeric parts
//! before string parts. It is cheap, total, and deterministic across
//! processes - and it is deliberately **not** display order (`b` sorts
//! before `a.a`, `9` before `10`). Every sorted array in the attribute
//! subsystem is sorted with this order and binary-searched with this order;
//! there is no separate comparator to get out of sync.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;

/// One component of a hierarchical name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum NamePart {
    /// Numeric component, used for generated and scoped names.
    Num(u64),
    /// String component.
    Str(Box<str>),
}

impl From<&str> for NamePart {
    fn from(s: &str) -> Self {
        NamePart::Str(s.into())
    }
}

impl From<String> for NamePart {
    fn from(s: String) -> Self {
        NamePart::Str(s.into_boxed_str())
    }
}

impl From<u64> for NamePart {
    fn from(n: u64) -> Self {
        NamePart::Num(n)
    }
}

impl fmt::Display for NamePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePart::Num(n) => write!(f, "{n}"),
            NamePart::Str(s) => f.write_str(s),
        }
    }
}

struct NameData {
    parts: Box<[NamePart]>,
    /// Content hash, precomputed once so `FxHashMap<Name, _>` lookups do
    /// not re-walk the components. Never used for ordering.
    hash: u64,
}

/// Hierarchical declaration name.
///
/// See the module docs for the ordering contract.
#[derive(Clone)]
pub struct Name(Arc<NameData>);

impl Name {
    /// Build a name from its components.
    pub fn from_parts(parts: Vec<NamePart>) -> Self {
        let parts: Box<[NamePart]> = parts.into_boxed_slice();
        let mut hasher = FxHasher::default();
        parts.hash(&mut hasher);
        Name(Arc::new(NameData {
            parts,
            hash: hasher.finish(),
        }))
    }

    /// Single-component name.
    pub fn root(part: impl Into<NamePart>) -> Self {
        Name::from_parts(vec![part.into()])
    }

    /// Extend this name with one more component.
    pub fn child(&self, part: impl Into<NamePart>) -> Self {
        let mut parts: Vec<NamePart> = self.0.parts.to_vec();
        parts.push(part.into());
        Name::from_parts(parts)
    }

    /// Parse a dotted path. Components made of digits become numeric parts,
    /// so `from_dotted("Foo.3.bar")` and `Name::root("Foo").child(3u64).child("bar")`
    /// agree. Intended for tests and tools; the elaborator builds names
    /// structurally.
    pub fn from_dotted(path: &str) -> Self {
        let parts = path
            .split('.')
            .filter(|seg| !seg.is_empty())
            .map(|seg| match seg.parse::<u64>() {
                Ok(n) => NamePart::Num(n),
                Err(_) => NamePart::Str(seg.into()),
            })
            .collect();
        Name::from_parts(parts)
    }

    /// The components, outermost first.
    pub fn parts(&self) -> &[NamePart] {
        &self.0.parts
    }

    /// Number of components.
    pub fn num_parts(&self) -> usize {
        self.0.parts.len()
    }

    /// Whether `suffix`'s components are a suffix of this name's components.
    /// `A.b.c` ends with `b.c`, with `c`, and with itself.
    pub fn ends_with(&self, suffix: &Name) -> bool {
        let mine = &self.0.parts;
        let theirs = &suffix.0.parts;
        theirs.len() <= mine.len() && mine[mine.len() - theirs.len()..] == **theirs
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.hash == other.0.hash && self.0.parts == other.0.parts)
    }
}

impl Eq for Name {}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    /// The quick order: component count, then components left to right
    /// (`Num < Str`, numbers numerically, strings bytewise).
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.0
            .parts
            .len()
            .cmp(&other.0.parts.len())
            .then_with(|| self.0.parts.cmp(&other.0.parts))
    }
}

impl Hash for Name {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}

#[cfg(feature = "cache")]
impl serde::Serialize for Name {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.parts.serialize(serializer)
    }
}

#[cfg(feature = "cache")]
impl<'de> serde::Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The hash is recomputed from content, so a reloaded name is
        // order-identical to the one that was written out.
        let parts = Vec::<NamePart>::deserialize(deserializer)?;
        Ok(Name::from_parts(parts))
    }
}

#[cfg(test)]
mod tests;
