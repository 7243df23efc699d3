//! Core data model for the Refract module runtime.
//!
//! This crate provides:
//! - String interning for attribute keys (`intern`)
//! - The attribute value representation (`Value`)
//! - The runtime namespace object (`ModuleObject`)
//!
//! The import machinery that operates on these types lives in
//! `refract_import`.

pub mod intern;
pub mod module;
pub mod value;

// Re-export commonly used items
pub use intern::{InternedString, intern, interned_count};
pub use module::ModuleObject;
pub use value::Value;
