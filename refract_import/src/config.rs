//! Import behavior configuration resolved from environment variables.
//!
//! A single struct captures the knobs, resolved once at resolver
//! construction for zero-cost access during imports. All fields are
//! immutable after construction.

use std::env;

// =============================================================================
// Import Configuration
// =============================================================================

/// Import behavior settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportConfig {
    /// Resolve every submodule of a lazy namespace at installation time
    /// instead of on first access (`REFRACT_EAGER_IMPORT`). Debugging aid:
    /// surfaces initialization failures immediately.
    pub eager_import: bool,

    /// Emit import events at `debug` level instead of `trace`
    /// (`REFRACT_TRACE_IMPORTS`).
    pub trace_imports: bool,
}

impl ImportConfig {
    /// Resolve configuration from the environment.
    ///
    /// A variable counts as set when non-empty and not `"0"`.
    pub fn from_env() -> Self {
        Self {
            eager_import: env_bool("REFRACT_EAGER_IMPORT"),
            trace_imports: env_bool("REFRACT_TRACE_IMPORTS"),
        }
    }
}

/// Read a boolean environment variable.
fn env_bool(name: &str) -> bool {
    match env::var(name) {
        Ok(value) => !value.is_empty() && value != "0",
        Err(_) => false,
    }
}

// =============================================================================
// Tests
// =============================================================================
