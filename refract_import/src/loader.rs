//! The loader capability: locating and initializing modules by name.
//!
//! The resolver does not know where modules come from; it delegates to a
//! [`ModuleLoader`]. The built-in implementation, [`BuiltinRegistry`], maps
//! absolute dotted names to builder functions registered by the host.

use crate::resolver::ImportError;
use parking_lot::RwLock;
use refract_core::ModuleObject;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

// =============================================================================
// ModuleLoader
// =============================================================================

/// A capability that locates, loads, and initializes a module.
///
/// `load` runs the module's initialization code on every call; caching is
/// the resolver's job, not the loader's. Initialization may have side
/// effects visible to the rest of the process, and may fail; failures
/// propagate to whoever triggered the load.
pub trait ModuleLoader: Send + Sync {
    /// Load the module with the given absolute dotted name.
    fn load(&self, name: &str) -> Result<Arc<ModuleObject>, ImportError>;
}

// =============================================================================
// BuiltinRegistry
// =============================================================================

/// A builder that may fail during module initialization.
type FallibleBuilder = Box<dyn Fn() -> Result<ModuleObject, ImportError> + Send + Sync>;

/// Name→builder module registry.
///
/// Hosts register a builder per module; `load` runs the builder for the
/// requested name. Builders for submodules are registered under their full
/// dotted name ("sensor.driver", not "driver").
pub struct BuiltinRegistry {
    builders: RwLock<FxHashMap<Arc<str>, FallibleBuilder>>,
}

impl BuiltinRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            builders: RwLock::new(FxHashMap::default()),
        }
    }

    /// Register an infallible module builder.
    pub fn register(
        &self,
        name: impl Into<Arc<str>>,
        builder: impl Fn() -> ModuleObject + Send + Sync + 'static,
    ) {
        self.register_fallible(name, move || Ok(builder()));
    }

    /// Register a builder whose initialization may fail.
    ///
    /// The builder's error propagates unmodified to the import that
    /// triggered it.
    pub fn register_fallible(
        &self,
        name: impl Into<Arc<str>>,
        builder: impl Fn() -> Result<ModuleObject, ImportError> + Send + Sync + 'static,
    ) {
        self.builders.write().insert(name.into(), Box::new(builder));
    }

    /// Remove a registration. Returns `true` if it existed.
    pub fn unregister(&self, name: &str) -> bool {
        self.builders.write().remove(name).is_some()
    }

    /// Check whether a name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.builders.read().contains_key(name)
    }

    /// All registered names, unordered.
    pub fn names(&self) -> Vec<Arc<str>> {
        self.builders.read().keys().cloned().collect()
    }

    /// Number of registered builders.
    #[inline]
    pub fn len(&self) -> usize {
        self.builders.read().len()
    }

    /// Check whether the registry is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.builders.read().is_empty()
    }
}

impl ModuleLoader for BuiltinRegistry {
    fn load(&self, name: &str) -> Result<Arc<ModuleObject>, ImportError> {
        let builders = self.builders.read();
        let builder = builders
            .get(name)
            .ok_or_else(|| ImportError::not_found(name))?;
        let module = builder()?;
        Ok(Arc::new(module))
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinRegistry")
            .field("registered", &self.len())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
