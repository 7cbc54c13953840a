//! String interner for identifier and property-name storage.
//!
//! Interned strings live for the whole compile; storage is never reclaimed
//! before process exit. This matches the arena lifecycle of the rest of the
//! IR: nodes and the names they reference are freed all at once.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Interior state behind the lock.
struct Inner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name`.
    strings: Vec<&'static str>,
}

/// String interner with O(1) lookup and equality.
///
/// # Thread Safety
///
/// Uses a `parking_lot::RwLock` so a single interner can be shared across
/// independent compile units; the fast path (already-interned string) takes
/// only a read lock.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        StringInterner {
            inner: RwLock::new(Inner {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same content twice returns the same `Name`.
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned.
        {
            let inner = self.inner.read();
            if let Some(&idx) = inner.map.get(s) {
                return Name::from_raw(idx);
            }
        }

        let mut inner = self.inner.write();
        // Re-check: another writer may have interned it between the locks.
        if let Some(&idx) = inner.map.get(s) {
            return Name::from_raw(idx);
        }
        let idx = match u32::try_from(inner.strings.len()) {
            Ok(idx) => idx,
            Err(_) => panic!("interner exceeded u32::MAX strings"),
        };
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        inner.map.insert(leaked, idx);
        inner.strings.push(leaked);
        Name::from_raw(idx)
    }

    /// Resolve a `Name` back to its string content.
    ///
    /// # Panics
    ///
    /// Panics if `name` was not produced by this interner.
    pub fn resolve(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.index()]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Returns `true` if only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
