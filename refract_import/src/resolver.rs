//! The import resolver: the process-wide module cache and its load path.
//!
//! # Architecture
//!
//! ```text
//! ImportResolver
//!   ├── module cache (RwLock<FxHashMap<Arc<str>, Arc<ModuleObject>>>)
//!   ├── installed lazy namespaces (one per package, at most)
//!   ├── ModuleLoader (host-supplied; BuiltinRegistry by default)
//!   └── ImportConfig (resolved once, immutable)
//! ```
//!
//! Importing a dotted name resolves the parent chain first: each prefix is
//! imported and cached, and each loaded module is bound as an attribute of
//! its parent. Repeated imports of a cached name return the identical
//! handle. Load failures propagate to the caller and are never cached, so
//! the next import retries from scratch.

use crate::config::ImportConfig;
use crate::lazy::LazyNamespace;
use crate::loader::{BuiltinRegistry, ModuleLoader};
use crate::package::{DottedName, leaf_name};
use parking_lot::RwLock;
use refract_core::{ModuleObject, Value};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

// =============================================================================
// ImportError
// =============================================================================

/// Failure modes of the import machinery.
///
/// Errors propagate to the caller of the access that triggered them, with
/// no wrapping, no retry, and no fallback value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The loader could not locate a module with this name.
    NotFound {
        /// The requested module name.
        module: Arc<str>,
    },

    /// The module was located but its initialization failed, or the
    /// requested name was malformed.
    LoadError {
        /// The requested module name.
        module: Arc<str>,
        /// Loader- or host-provided detail.
        message: Arc<str>,
    },

    /// The requested attribute is neither lazily loadable nor present in
    /// the attribute store.
    AttributeNotFound {
        /// The module whose attribute was requested.
        module: Arc<str>,
        /// The missing attribute name.
        attribute: Arc<str>,
    },
}

impl ImportError {
    /// Loader could not locate `module`.
    pub fn not_found(module: impl Into<Arc<str>>) -> Self {
        ImportError::NotFound {
            module: module.into(),
        }
    }

    /// `module` failed to load or initialize.
    pub fn load_error(module: impl Into<Arc<str>>, message: impl Into<Arc<str>>) -> Self {
        ImportError::LoadError {
            module: module.into(),
            message: message.into(),
        }
    }

    /// `module` has no attribute `attribute`.
    pub fn attribute_not_found(
        module: impl Into<Arc<str>>,
        attribute: impl Into<Arc<str>>,
    ) -> Self {
        ImportError::AttributeNotFound {
            module: module.into(),
            attribute: attribute.into(),
        }
    }

    /// The module name the error refers to.
    pub fn module(&self) -> &str {
        match self {
            ImportError::NotFound { module }
            | ImportError::LoadError { module, .. }
            | ImportError::AttributeNotFound { module, .. } => module,
        }
    }
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::NotFound { module } => {
                write!(f, "no module named '{}'", module)
            }
            ImportError::LoadError { module, message } => {
                write!(f, "cannot load module '{}': {}", module, message)
            }
            ImportError::AttributeNotFound { module, attribute } => {
                write!(f, "module '{}' has no attribute '{}'", module, attribute)
            }
        }
    }
}

impl std::error::Error for ImportError {}

// =============================================================================
// ImportResolver
// =============================================================================

/// Module cache plus load path.
///
/// Thread-safe. Concurrent first imports of the same name are not
/// serialized: both threads may run the loader, and the later cache insert
/// wins. Every other path hands out the cached handle.
pub struct ImportResolver {
    /// Cache of loaded modules, keyed by absolute dotted name.
    modules: RwLock<FxHashMap<Arc<str>, Arc<ModuleObject>>>,

    /// Installed lazy namespaces, keyed by package name.
    lazy: RwLock<FxHashMap<Arc<str>, Arc<LazyNamespace>>>,

    /// The host-supplied import mechanism.
    loader: Arc<dyn ModuleLoader>,

    /// Behavior knobs, resolved once.
    config: ImportConfig,
}

impl ImportResolver {
    /// Create a resolver over the given loader with default configuration.
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self::with_config(loader, ImportConfig::default())
    }

    /// Create a resolver with explicit configuration.
    pub fn with_config(loader: Arc<dyn ModuleLoader>, config: ImportConfig) -> Self {
        Self {
            modules: RwLock::new(FxHashMap::default()),
            lazy: RwLock::new(FxHashMap::default()),
            loader,
            config,
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    // =========================================================================
    // Importing
    // =========================================================================

    /// Import a module by absolute dotted name.
    ///
    /// Cache hits return the identical handle. On a miss, every prefix of a
    /// dotted name is imported first and each loaded module is bound as an
    /// attribute of its parent. Loader failures propagate and leave no
    /// cache entry behind.
    pub fn import_module(&self, name: &str) -> Result<Arc<ModuleObject>, ImportError> {
        if let Some(module) = self.cached(name) {
            self.trace_event(name, "import cache hit");
            return Ok(module);
        }

        let dotted = DottedName::parse(name)
            .ok_or_else(|| ImportError::load_error(name, "invalid module name"))?;

        let mut current = match self.cached(dotted.top_level()) {
            Some(module) => module,
            None => self.load_and_cache(dotted.top_level())?,
        };

        for depth in 2..=dotted.depth() {
            let prefix = dotted.name_at_depth(depth);
            let module = match self.cached(&prefix) {
                Some(module) => module,
                None => self.resolve_child(&current, &prefix)?,
            };
            current.set_attr(leaf_name(&prefix), Value::module(Arc::clone(&module)));
            current = module;
        }

        Ok(current)
    }

    /// Read an attribute from an imported module.
    pub fn import_from(&self, module: &ModuleObject, name: &str) -> Result<Value, ImportError> {
        module
            .get_attr(name)
            .ok_or_else(|| ImportError::attribute_not_found(module.name(), name))
    }

    /// All public attributes of a module, for star-imports.
    pub fn import_star(&self, module: &ModuleObject) -> Vec<(refract_core::InternedString, Value)> {
        module.public_attrs()
    }

    /// Resolve a child module: prefer a module already bound as an
    /// attribute of its parent, otherwise run the loader.
    fn resolve_child(
        &self,
        parent: &ModuleObject,
        full_name: &str,
    ) -> Result<Arc<ModuleObject>, ImportError> {
        let leaf = leaf_name(full_name);
        if let Some(bound) = parent.get_attr(leaf).and_then(|v| v.as_module().cloned()) {
            self.modules
                .write()
                .insert(Arc::from(full_name), Arc::clone(&bound));
            return Ok(bound);
        }
        self.load_and_cache(full_name)
    }

    /// Run the loader and publish the result in the cache.
    fn load_and_cache(&self, name: &str) -> Result<Arc<ModuleObject>, ImportError> {
        self.trace_event(name, "loading");
        let module = self.loader.load(name)?;
        // Concurrent first imports may both get here; the later insert wins.
        self.modules
            .write()
            .insert(Arc::from(name), Arc::clone(&module));
        Ok(module)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Look up a cached module.
    #[inline]
    fn cached(&self, name: &str) -> Option<Arc<ModuleObject>> {
        self.modules.read().get(name).cloned()
    }

    /// Place a module in the cache without running the loader.
    pub fn insert_module(&self, name: impl Into<Arc<str>>, module: Arc<ModuleObject>) {
        self.modules.write().insert(name.into(), module);
    }

    /// Remove a module from the cache, returning it if present.
    pub fn remove_module(&self, name: &str) -> Option<Arc<ModuleObject>> {
        self.modules.write().remove(name)
    }

    /// Check whether a module is cached.
    #[inline]
    pub fn contains_module(&self, name: &str) -> bool {
        self.modules.read().contains_key(name)
    }

    /// Names of all cached modules, unordered.
    pub fn cached_modules(&self) -> Vec<Arc<str>> {
        self.modules.read().keys().cloned().collect()
    }

    /// Number of cached modules.
    #[inline]
    pub fn module_count(&self) -> usize {
        self.modules.read().len()
    }

    // =========================================================================
    // Lazy Namespace Registration
    // =========================================================================

    /// Record an installed lazy namespace for `package`.
    ///
    /// At most one installation per package per resolver; a second attempt
    /// is an error. Check-and-insert is atomic under the write lock.
    pub(crate) fn register_lazy(
        &self,
        package: Arc<str>,
        namespace: Arc<LazyNamespace>,
    ) -> Result<(), ImportError> {
        let mut lazy = self.lazy.write();
        if lazy.contains_key(&package) {
            return Err(ImportError::load_error(
                package,
                "lazy namespace already installed",
            ));
        }
        debug!(package = &*package, "lazy namespace installed");
        lazy.insert(package, namespace);
        Ok(())
    }

    /// The lazy namespace installed for `package`, if any.
    pub fn lazy_namespace(&self, package: &str) -> Option<Arc<LazyNamespace>> {
        self.lazy.read().get(package).cloned()
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    fn trace_event(&self, name: &str, what: &str) {
        if self.config.trace_imports {
            debug!(module = name, "{}", what);
        } else {
            trace!(module = name, "{}", what);
        }
    }
}

impl fmt::Debug for ImportResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportResolver")
            .field("modules", &self.module_count())
            .field("lazy_namespaces", &self.lazy.read().len())
            .field("config", &self.config)
            .finish()
    }
}

// =============================================================================
// Global Resolver Access
// =============================================================================

/// Global builtin registry singleton.
static GLOBAL_BUILTINS: OnceLock<Arc<BuiltinRegistry>> = OnceLock::new();

/// Global resolver singleton.
static GLOBAL_RESOLVER: OnceLock<Arc<ImportResolver>> = OnceLock::new();

/// The process-wide builtin registry.
///
/// Builders registered here are visible to [`global_resolver`].
pub fn global_builtins() -> &'static Arc<BuiltinRegistry> {
    GLOBAL_BUILTINS.get_or_init(|| Arc::new(BuiltinRegistry::new()))
}

/// The process-wide resolver, created on first use over the global
/// registry with environment-resolved configuration.
pub fn global_resolver() -> &'static Arc<ImportResolver> {
    GLOBAL_RESOLVER.get_or_init(|| {
        let loader = Arc::clone(global_builtins()) as Arc<dyn ModuleLoader>;
        Arc::new(ImportResolver::with_config(loader, ImportConfig::from_env()))
    })
}

// =============================================================================
// Tests
// =============================================================================
