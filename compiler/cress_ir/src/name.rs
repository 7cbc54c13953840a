//! Interned string identifier.
//!
//! A `Name` is a compact 32-bit index into the compile-wide
//! [`StringInterner`](crate::StringInterner). Equality and hashing are O(1)
//! integer operations, which matters because scope lookups and property-name
//! concatenation hammer name comparisons.

use std::fmt;

/// Interned string identifier.
///
/// The empty string is pre-interned at index 0 so `Name::EMPTY` is always
/// valid, letting `Name` replace `Option<Name>` for "no name" cases such as
/// positional call arguments.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get the raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index into the interner's storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns `true` if this is the pre-interned empty string.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
