//! Dotted names and relative submodule identifiers.
//!
//! Provides the name-level machinery for resolving:
//! - **Dotted imports**: `"sensor.driver"` → resolve `sensor`, then `driver`
//! - **Relative identifiers**: a submodule leaf plus its owning package's
//!   qualified name → an absolute dotted name
//!
//! # Architecture
//!
//! ```text
//! DottedName::parse("sensor.driver.usb")
//!   ├── Split → ["sensor", "driver", "usb"]
//!   ├── Validate (no empty components)
//!   └── name_at_depth(2) → "sensor.driver"
//!
//! resolve_relative_import("driver", 1, "sensor")
//!   └── "sensor.driver"    (level 1 = the package itself)
//! ```
//!
//! # Performance
//!
//! - Components are split once at parse time (SmallVec, inline for ≤4 parts)
//! - Fast path for non-dotted names (no joining needed)

use crate::resolver::ImportError;
use smallvec::SmallVec;
use std::sync::Arc;

// =============================================================================
// Dotted Name Resolution
// =============================================================================

/// Parsed dotted module name with pre-split components.
///
/// Avoids re-splitting on each resolution attempt.
#[derive(Debug, Clone)]
pub struct DottedName {
    /// The full dotted name (e.g., "sensor.driver.usb").
    full_name: Arc<str>,
    /// Pre-split components; inline storage for the common ≤4-part case.
    parts: SmallVec<[Arc<str>; 4]>,
}

impl DottedName {
    /// Parse a dotted module name.
    ///
    /// Returns `None` for empty names or names with empty components
    /// (`".x"`, `"x..y"`, `"x."`).
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }

        let parts: SmallVec<[Arc<str>; 4]> = name.split('.').map(Arc::from).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }

        Some(Self {
            full_name: Arc::from(name),
            parts,
        })
    }

    /// The full dotted name.
    #[inline]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The components of the dotted name.
    #[inline]
    pub fn parts(&self) -> &[Arc<str>] {
        &self.parts
    }

    /// Check if this is a simple (non-dotted) name.
    #[inline]
    pub fn is_simple(&self) -> bool {
        self.parts.len() == 1
    }

    /// The top-level module name.
    #[inline]
    pub fn top_level(&self) -> &str {
        &self.parts[0]
    }

    /// The number of components.
    #[inline]
    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    /// The name truncated to a given nesting depth.
    ///
    /// E.g., for "sensor.driver.usb", depth=2 → "sensor.driver".
    pub fn name_at_depth(&self, depth: usize) -> String {
        let depth = depth.min(self.parts.len());
        self.parts[..depth]
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(".")
    }
}

// =============================================================================
// Relative Identifier Resolution
// =============================================================================

/// Resolve a relative submodule identifier to an absolute module name.
///
/// # Parameters
///
/// - `name`: The relative name (may be empty, meaning "the package itself")
/// - `level`: 1 = current package, 2 = parent package, etc. 0 = absolute
/// - `package`: The qualified name of the package providing context
///
/// # Examples
///
/// ```
/// use refract_import::package::resolve_relative_import;
///
/// assert_eq!(resolve_relative_import("driver", 1, "sensor").unwrap(), "sensor.driver");
/// assert_eq!(resolve_relative_import("qux", 2, "a.b.c").unwrap(), "a.b.qux");
/// assert_eq!(resolve_relative_import("", 3, "a.b.c").unwrap(), "a");
/// ```
pub fn resolve_relative_import(
    name: &str,
    level: u32,
    package: &str,
) -> Result<String, ImportError> {
    if level == 0 {
        // Absolute identifier, no context needed.
        return Ok(name.to_string());
    }

    if package.is_empty() {
        return Err(ImportError::load_error(
            name,
            "attempted relative import without package context",
        ));
    }

    let pkg_parts: Vec<&str> = package.split('.').collect();
    let level = level as usize;

    if level > pkg_parts.len() {
        return Err(ImportError::load_error(
            name,
            format!(
                "relative import beyond top-level package (level={}, package depth={})",
                level,
                pkg_parts.len()
            ),
        ));
    }

    // Level 1 keeps the whole package name, level 2 drops one component, ...
    let base_depth = pkg_parts.len() - level + 1;
    let base: String = pkg_parts[..base_depth].join(".");

    if name.is_empty() {
        Ok(base)
    } else {
        Ok(format!("{}.{}", base, name))
    }
}

// =============================================================================
// Name Utilities
// =============================================================================

/// The parent package of a dotted module name.
///
/// E.g., "sensor.driver" → "sensor"; "sensor" → None.
#[inline]
pub fn parent_package(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(parent, _)| parent)
}

/// The leaf component of a dotted module name.
///
/// E.g., "sensor.driver" → "driver"; "sensor" → "sensor".
#[inline]
pub fn leaf_name(name: &str) -> &str {
    name.rsplit_once('.').map(|(_, leaf)| leaf).unwrap_or(name)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // DottedName Tests
    // =========================================================================

    #[test]
    fn test_dotted_name_simple() {
        let dn = DottedName::parse("sensor").unwrap();
        assert_eq!(dn.full_name(), "sensor");
        assert!(dn.is_simple());
        assert_eq!(dn.depth(), 1);
        assert_eq!(dn.top_level(), "sensor");
    }

    #[test]
    fn test_dotted_name_two_parts() {
        let dn = DottedName::parse("sensor.driver").unwrap();
        assert!(!dn.is_simple());
        assert_eq!(dn.depth(), 2);
        assert_eq!(dn.top_level(), "sensor");
        assert_eq!(dn.parts()[1].as_ref(), "driver");
    }

    #[test]
    fn test_dotted_name_rejects_malformed() {
        assert!(DottedName::parse("").is_none());
        assert!(DottedName::parse(".sensor").is_none());
        assert!(DottedName::parse("sensor.").is_none());
        assert!(DottedName::parse("sensor..driver").is_none());
    }

    #[test]
    fn test_dotted_name_name_at_depth() {
        let dn = DottedName::parse("a.b.c.d").unwrap();
        assert_eq!(dn.name_at_depth(1), "a");
        assert_eq!(dn.name_at_depth(2), "a.b");
        assert_eq!(dn.name_at_depth(4), "a.b.c.d");
        // Clamped past the end.
        assert_eq!(dn.name_at_depth(100), "a.b.c.d");
    }

    // =========================================================================
    // Relative Identifier Tests
    // =========================================================================

    #[test]
    fn test_relative_level_zero_is_absolute() {
        assert_eq!(resolve_relative_import("sensor", 0, "").unwrap(), "sensor");
    }

    #[test]
    fn test_relative_level_one() {
        assert_eq!(
            resolve_relative_import("driver", 1, "sensor").unwrap(),
            "sensor.driver"
        );
        assert_eq!(resolve_relative_import("", 1, "sensor").unwrap(), "sensor");
    }

    #[test]
    fn test_relative_deeper_levels() {
        assert_eq!(
            resolve_relative_import("qux", 2, "a.b.c").unwrap(),
            "a.b.qux"
        );
        assert_eq!(resolve_relative_import("", 3, "a.b.c").unwrap(), "a");
        assert_eq!(resolve_relative_import("x", 3, "a.b.c").unwrap(), "a.x");
    }

    #[test]
    fn test_relative_beyond_top_level() {
        assert!(resolve_relative_import("x", 4, "a.b.c").is_err());
    }

    #[test]
    fn test_relative_without_package_context() {
        assert!(resolve_relative_import("x", 1, "").is_err());
    }

    // =========================================================================
    // Utility Tests
    // =========================================================================

    #[test]
    fn test_parent_package() {
        assert_eq!(parent_package("sensor.driver"), Some("sensor"));
        assert_eq!(parent_package("a.b.c"), Some("a.b"));
        assert_eq!(parent_package("sensor"), None);
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("sensor.driver"), "driver");
        assert_eq!(leaf_name("a.b.c"), "c");
        assert_eq!(leaf_name("sensor"), "sensor");
    }
}
