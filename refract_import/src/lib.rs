//! Import machinery for the Refract module runtime.
//!
//! This crate provides module loading and caching with lazy namespace
//! support: a package's namespace can be installed as a facade that
//! imports a fixed set of submodules on first attribute access.
//!
//! # Architecture
//!
//! ```text
//! LazyNamespace (one per installed package)
//!   └── ImportResolver
//!         ├── module cache (the sys.modules analog)
//!         ├── ModuleLoader (host capability; BuiltinRegistry provided)
//!         └── ImportConfig (environment-resolved knobs)
//! ```
//!
//! # Usage
//!
//! ```
//! use refract_core::{ModuleObject, Value};
//! use refract_import::{BuiltinRegistry, ImportResolver, LazyNamespace, ModuleLoader};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(BuiltinRegistry::new());
//! registry.register("sensor", || ModuleObject::new("sensor"));
//! registry.register("sensor.driver", || {
//!     let m = ModuleObject::new("sensor.driver");
//!     m.set_attr("BAUD", Value::int(115_200));
//!     m
//! });
//!
//! let resolver = Arc::new(ImportResolver::new(registry as Arc<dyn ModuleLoader>));
//! let ns = LazyNamespace::install(&resolver, "sensor", &["driver"]).unwrap();
//!
//! // First access imports; later accesses return the cached handle.
//! let driver = ns.get("driver").unwrap();
//! assert_eq!(driver.as_module().unwrap().name(), "sensor.driver");
//! ```

pub mod config;
pub mod lazy;
pub mod loader;
pub mod package;
pub mod resolver;


pub use config::ImportConfig;
pub use lazy::LazyNamespace;
pub use loader::{BuiltinRegistry, ModuleLoader};
pub use package::{DottedName, resolve_relative_import};
pub use resolver::{ImportError, ImportResolver, global_builtins, global_resolver};
