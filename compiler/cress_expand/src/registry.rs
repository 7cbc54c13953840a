//! Import registry: resolved file id to pre-parsed style sheet.

use cress_ir::{BlockId, Name};
use rustc_hash::FxHashMap;

/// Mapping from resolved import target to its already-parsed root block.
///
/// Populated entirely by the import-resolution machinery before expansion
/// starts; expansion only reads it. There is no on-demand parsing during
/// expansion; a missing entry is a fatal caller error, not a trigger to go
/// load a file.
#[derive(Default)]
pub struct ImportRegistry {
    sheets: FxHashMap<Name, BlockId>,
}

impl ImportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pre-parsed style sheet under its resolved file id.
    pub fn insert(&mut self, file: Name, sheet: BlockId) {
        self.sheets.insert(file, sheet);
    }

    /// Look up the pre-parsed block for a resolved file id.
    #[inline]
    pub fn lookup(&self, file: Name) -> Option<BlockId> {
        self.sheets.get(&file).copied()
    }

    /// Number of registered sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns `true` if no sheets are registered.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
