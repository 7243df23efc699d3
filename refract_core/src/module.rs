//! `ModuleObject`: the runtime namespace object.
//!
//! A `ModuleObject` is the loaded representation of a package or submodule:
//! a name, an attribute store, location metadata, and the search path used
//! to locate nested modules. Attribute lookup is O(1) via `FxHashMap` with
//! interned string keys; the store is behind an `RwLock` so concurrent
//! readers never block each other.

use crate::intern::{InternedString, intern};
use crate::value::Value;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

// =============================================================================
// ModuleObject
// =============================================================================

/// A namespace object with attribute storage.
///
/// Stores:
/// - Identity (`__name__`, optional `__doc__`/`__file__`/`__package__`)
/// - Attributes (constants, functions-as-values, nested module handles)
/// - The search path consulted when locating nested modules
#[derive(Debug)]
pub struct ModuleObject {
    /// Fully-qualified module name (e.g., "mypkg", "mypkg.alpha").
    name: Arc<str>,

    /// Attribute store. RwLock for concurrent read access (common case).
    attrs: RwLock<FxHashMap<InternedString, Value>>,

    /// Location metadata consulted by loaders for nested modules.
    search_path: RwLock<Vec<Arc<str>>>,

    /// Parent package name ("mypkg" for "mypkg.alpha"), if any.
    package: Option<Arc<str>>,
}

impl ModuleObject {
    /// Create a new empty module with the given name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let mut attrs = FxHashMap::default();
        attrs.insert(intern("__name__"), Value::string(intern(&name)));

        Self {
            name,
            attrs: RwLock::new(attrs),
            search_path: RwLock::new(Vec::new()),
            package: None,
        }
    }

    /// Create a module with documentation, file, and package metadata.
    ///
    /// Each provided field is also mirrored into the attribute store under
    /// its dunder name, so plain attribute reads see it.
    pub fn with_metadata(
        name: impl Into<Arc<str>>,
        doc: Option<Arc<str>>,
        file: Option<Arc<str>>,
        package: Option<Arc<str>>,
    ) -> Self {
        let name = name.into();
        let mut attrs = FxHashMap::default();
        attrs.insert(intern("__name__"), Value::string(intern(&name)));

        if let Some(doc) = &doc {
            attrs.insert(intern("__doc__"), Value::string(intern(doc)));
        }
        if let Some(file) = &file {
            attrs.insert(intern("__file__"), Value::string(intern(file)));
        }
        if let Some(pkg) = &package {
            attrs.insert(intern("__package__"), Value::string(intern(pkg)));
        }

        Self {
            name,
            attrs: RwLock::new(attrs),
            search_path: RwLock::new(Vec::new()),
            package,
        }
    }

    /// The fully-qualified module name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parent package name, if this module belongs to one.
    #[inline]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    // =========================================================================
    // Attribute Access
    // =========================================================================

    /// Read an attribute. `None` if absent.
    #[inline]
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.attrs.read().get(&intern(name)).cloned()
    }

    /// Write an attribute, replacing any previous value.
    #[inline]
    pub fn set_attr(&self, name: &str, value: Value) {
        self.attrs.write().insert(intern(name), value);
    }

    /// Check whether an attribute exists.
    #[inline]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.read().contains_key(&intern(name))
    }

    /// Remove an attribute. Returns `true` if it existed.
    #[inline]
    pub fn del_attr(&self, name: &str) -> bool {
        self.attrs.write().remove(&intern(name)).is_some()
    }

    /// All attribute names, unordered.
    pub fn dir(&self) -> Vec<InternedString> {
        self.attrs.read().keys().cloned().collect()
    }

    /// Attribute names not starting with an underscore.
    pub fn public_names(&self) -> Vec<InternedString> {
        self.attrs
            .read()
            .keys()
            .filter(|k| !k.as_str().starts_with('_'))
            .cloned()
            .collect()
    }

    /// All attributes as (name, value) pairs.
    pub fn all_attrs(&self) -> Vec<(InternedString, Value)> {
        self.attrs
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Public attributes as (name, value) pairs (for star-imports).
    pub fn public_attrs(&self) -> Vec<(InternedString, Value)> {
        self.attrs
            .read()
            .iter()
            .filter(|(k, _)| !k.as_str().starts_with('_'))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attrs.read().len()
    }

    /// Check whether the attribute store is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attrs.read().is_empty()
    }

    // =========================================================================
    // Search Path
    // =========================================================================

    /// Snapshot of the search path.
    pub fn search_path(&self) -> Vec<Arc<str>> {
        self.search_path.read().clone()
    }

    /// Replace the search path.
    pub fn set_search_path(&self, paths: Vec<Arc<str>>) {
        *self.search_path.write() = paths;
    }

    /// Append entries to the search path.
    pub fn extend_search_path(&self, paths: impl IntoIterator<Item = Arc<str>>) {
        self.search_path.write().extend(paths);
    }

    // =========================================================================
    // Namespace Takeover
    // =========================================================================

    /// Copy every attribute and the search path from `other` into this
    /// module. Existing attributes with the same name are overwritten;
    /// attributes only present here are kept.
    ///
    /// Used when one namespace object takes over for another: the
    /// replacement must expose everything already defined on the original
    /// at the point of substitution.
    pub fn absorb(&self, other: &ModuleObject) {
        let snapshot = other.all_attrs();
        {
            let mut attrs = self.attrs.write();
            for (name, value) in snapshot {
                attrs.insert(name, value);
            }
        }
        self.set_search_path(other.search_path());
    }
}

// =============================================================================
// Tests
// =============================================================================
