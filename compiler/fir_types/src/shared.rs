//! Thread-safe handle to one pool.
//!
//! Several threads lowering the same compilation unit must see the same
//! canonical types, so they share a single pool behind one lock. Readers
//! (classification, printing) run concurrently; interning takes the write
//! lock, which makes "look up, else insert" atomic per key.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Idx, ParseError, Pool};

/// Clonable handle to a pool shared between threads.
///
/// # Thread Safety
/// Uses `Arc` for reference counting and a `parking_lot::RwLock` as the
/// single mutual-exclusion domain for the pool.
#[derive(Clone)]
pub struct SharedPool(Arc<RwLock<Pool>>);

impl std::fmt::Debug for SharedPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedPool")
            .field("len", &self.0.read().len())
            .finish()
    }
}

impl SharedPool {
    pub fn new() -> Self {
        Self::from_pool(Pool::new())
    }

    /// Share an existing pool. Handles it already produced stay valid.
    pub fn from_pool(pool: Pool) -> Self {
        SharedPool(Arc::new(RwLock::new(pool)))
    }

    /// Lock for queries.
    pub fn read(&self) -> RwLockReadGuard<'_, Pool> {
        self.0.read()
    }

    /// Lock for construction.
    pub fn write(&self) -> RwLockWriteGuard<'_, Pool> {
        self.0.write()
    }

    /// Parse `text` under the write lock.
    pub fn parse_type_str(&self, text: &str) -> Result<Idx, ParseError> {
        self.0.write().parse_type_str(text)
    }

    /// Format `idx` under the read lock.
    pub fn format_type(&self, idx: Idx) -> String {
        self.0.read().format_type(idx)
    }
}

impl Default for SharedPool {
    fn default() -> Self {
        Self::new()
    }
}
