//! Arena indices and ranges for the flat AST.
//!
//! Nodes reference children by index into [`StyleArena`](crate::StyleArena),
//! never by pointer. Indices are 4 bytes, compare in O(1), and cannot dangle
//! while the arena is alive.

use std::fmt;

macro_rules! arena_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a new id.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

arena_id! {
    /// Index into the expression arena.
    ExprId
}

arena_id! {
    /// Index into the statement arena.
    StmtId
}

arena_id! {
    /// Index into the block arena.
    BlockId
}

macro_rules! arena_range {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
        pub struct $name {
            /// Start index into the arena's flat side table.
            pub start: u32,
            /// Number of entries.
            pub len: u32,
        }

        impl $name {
            /// Empty range.
            pub const EMPTY: $name = $name { start: 0, len: 0 };

            /// Create a new range.
            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                $name { start, len }
            }

            /// Number of entries in the range.
            #[inline]
            pub const fn len(self) -> usize {
                self.len as usize
            }

            /// Returns `true` if the range is empty.
            #[inline]
            pub const fn is_empty(self) -> bool {
                self.len == 0
            }
        }
    };
}

arena_range! {
    /// Range of expression ids in the arena's expression list table.
    ExprRange
}

arena_range! {
    /// Range of formal parameters in the arena's parameter table.
    ParamRange
}

arena_range! {
    /// Range of call arguments in the arena's argument table.
    ArgRange
}
