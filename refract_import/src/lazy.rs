//! Lazy namespace facades: submodules imported on first access.
//!
//! A [`LazyNamespace`] stands in for a package's namespace object. Reads go
//! through [`LazyNamespace::get`]: names in the package's fixed submodule
//! set are imported on first access and the handle is cached in the
//! package's own attribute store; every other name is an ordinary attribute
//! lookup. Importing a submodule runs its initialization code, so the side
//! effects of untouched submodules never happen.
//!
//! # Resolution
//!
//! For `get(name)`:
//! 1. `name` in the fixed set with a truthy cached value → the cached
//!    handle, unchanged.
//! 2. `name` in the fixed set otherwise → resolve `package.name` through
//!    the resolver, store the handle, return it. Failures propagate and
//!    are not cached; the next access retries.
//! 3. `name` outside the fixed set → attribute-store lookup, or
//!    `AttributeNotFound`.
//!
//! Step 1 checks truthiness, not presence: a falsy slot under a fixed-set
//! name (including the `None` placeholder seeded at installation) is
//! treated as unresolved and loads again on the next access. Hosts that
//! pin a submodule must store a truthy value.
//!
//! # Concurrency
//!
//! First accesses are not serialized per name. Two threads racing the same
//! unresolved submodule may both trigger the import; the later store wins.

use crate::package::resolve_relative_import;
use crate::resolver::{ImportError, ImportResolver};
use refract_core::{ModuleObject, Value};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

// =============================================================================
// LazyNamespace
// =============================================================================

/// A package namespace whose submodule attributes load on demand.
///
/// The facade wraps the package's own [`ModuleObject`] (attributes,
/// metadata, and search path are shared with it, not copied) plus the
/// fixed set of submodule names eligible for lazy loading. The set is
/// immutable after installation.
pub struct LazyNamespace {
    /// The package's namespace object. Resolved submodule handles are
    /// cached here, under their leaf names.
    module: Arc<ModuleObject>,

    /// The fixed set of lazily-loadable submodule leaf names.
    submodules: Box<[Arc<str>]>,

    /// Import path for submodule resolution.
    resolver: Arc<ImportResolver>,
}

impl LazyNamespace {
    /// Install a lazy namespace for `package`.
    ///
    /// The package module is taken from the resolver cache (imported if not
    /// yet present), each fixed-set name without an existing attribute is
    /// seeded with a `None` placeholder, and the facade is recorded with
    /// the resolver. Attributes already defined on the package at
    /// installation time are kept as-is.
    ///
    /// Installation happens at most once per package per resolver; a
    /// second call is an error. With `eager_import` configured, every
    /// submodule is resolved before this returns.
    pub fn install(
        resolver: &Arc<ImportResolver>,
        package: &str,
        submodules: &[&str],
    ) -> Result<Arc<Self>, ImportError> {
        if resolver.lazy_namespace(package).is_some() {
            return Err(ImportError::load_error(
                package,
                "lazy namespace already installed",
            ));
        }

        let module = resolver.import_module(package)?;

        for sub in submodules {
            if !module.has_attr(sub) {
                module.set_attr(sub, Value::none());
            }
        }

        let namespace = Arc::new(Self {
            module,
            submodules: submodules
                .iter()
                .map(|s| Arc::from(*s))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
            resolver: Arc::clone(resolver),
        });

        // Eager resolution runs before the facade is recorded: a failed
        // installation leaves no namespace behind.
        if resolver.config().eager_import {
            for sub in namespace.submodules.iter() {
                namespace.get(sub)?;
            }
        }

        resolver.register_lazy(Arc::from(package), Arc::clone(&namespace))?;

        Ok(namespace)
    }

    /// Read an attribute.
    ///
    /// Fixed-set names resolve on first access and then return the
    /// identical cached handle; other names are plain attribute lookups.
    pub fn get(&self, name: &str) -> Result<Value, ImportError> {
        if self.is_lazy(name) {
            if let Some(value) = self.module.get_attr(name) {
                // Resolved means truthy. A falsy slot (the seeded
                // placeholder, or anything falsy stored later) loads
                // again on every access.
                if value.is_truthy() {
                    return Ok(value);
                }
            }
            return self.resolve(name);
        }

        self.module
            .get_attr(name)
            .ok_or_else(|| ImportError::attribute_not_found(self.module.name(), name))
    }

    /// Write an attribute. Passes straight through to the attribute store,
    /// fixed-set names included.
    pub fn set(&self, name: &str, value: Value) {
        self.module.set_attr(name, value);
    }

    /// Import a submodule and cache the handle under its leaf name.
    fn resolve(&self, name: &str) -> Result<Value, ImportError> {
        let absolute = resolve_relative_import(name, 1, self.module.name())?;
        trace!(
            package = self.module.name(),
            submodule = name,
            "resolving lazy submodule"
        );

        let handle = self.resolver.import_module(&absolute)?;
        let value = Value::module(handle);
        self.module.set_attr(name, value.clone());
        Ok(value)
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The package's qualified name.
    #[inline]
    pub fn name(&self) -> &str {
        self.module.name()
    }

    /// The wrapped namespace object.
    #[inline]
    pub fn module(&self) -> &Arc<ModuleObject> {
        &self.module
    }

    /// The fixed set of lazily-loadable submodule names.
    #[inline]
    pub fn submodules(&self) -> &[Arc<str>] {
        &self.submodules
    }

    /// Check whether a name belongs to the fixed set.
    #[inline]
    pub fn is_lazy(&self, name: &str) -> bool {
        self.submodules.iter().any(|s| s.as_ref() == name)
    }

    /// Check whether a fixed-set name currently holds a resolved handle.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.is_lazy(name)
            && self
                .module
                .get_attr(name)
                .is_some_and(|value| value.is_truthy())
    }
}

impl fmt::Debug for LazyNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolved = self
            .submodules
            .iter()
            .filter(|s| self.is_resolved(s))
            .count();
        f.debug_struct("LazyNamespace")
            .field("package", &self.module.name())
            .field("submodules", &self.submodules.len())
            .field("resolved", &resolved)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
