//! String interning for attribute keys.
//!
//! Attribute maps throughout Refract are keyed by `InternedString`. Interning
//! keeps one canonical allocation per distinct key, so clones are a refcount
//! bump and repeated lookups of hot names ("__name__", submodule leaves)
//! avoid re-allocating.
//!
//! # Performance
//!
//! - `intern` is a single sharded-map probe on the hit path
//! - `InternedString` clones are O(1)
//! - Equality and hashing are content-based, so strings interned in tests
//!   and strings interned by the runtime compare as expected

use dashmap::DashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

// =============================================================================
// InternedString
// =============================================================================

/// A canonical, cheaply-clonable string key.
///
/// Two `intern` calls with equal text return handles sharing the same
/// allocation for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InternedString(Arc<str>);

impl InternedString {
    /// View as a plain string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this handle shares its allocation with another.
    #[inline]
    pub fn same_allocation(&self, other: &InternedString) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl AsRef<str> for InternedString {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for InternedString {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for InternedString {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for InternedString {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// =============================================================================
// Global Intern Table
// =============================================================================

/// Process-wide intern table. Entries are never evicted.
static INTERN_TABLE: OnceLock<DashMap<Arc<str>, ()>> = OnceLock::new();

#[inline]
fn table() -> &'static DashMap<Arc<str>, ()> {
    INTERN_TABLE.get_or_init(DashMap::new)
}

/// Intern a string, returning the canonical handle.
pub fn intern(s: &str) -> InternedString {
    let table = table();

    // Fast path: already interned.
    if let Some(entry) = table.get(s) {
        return InternedString(Arc::clone(entry.key()));
    }

    // Slow path: insert. A concurrent insert of the same text may win the
    // race; the entry API hands back whichever allocation landed first.
    let candidate: Arc<str> = Arc::from(s);
    let entry = table.entry(candidate).or_insert(());
    InternedString(Arc::clone(entry.key()))
}

/// Number of distinct strings interned so far.
pub fn interned_count() -> usize {
    table().len()
}

// =============================================================================
// Tests
// =============================================================================
