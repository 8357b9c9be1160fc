//! Shared readiness flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle over the readiness flag. Clones share the same
/// underlying cell, so any collaborator holding a handle can flip
/// readiness without owning the whole reporter. Starts `false`.
#[derive(Clone, Debug, Default)]
pub struct Readiness {
    ready: Arc<AtomicBool>,
}

impl Readiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored value. Never blocks.
    pub fn set(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Current value.
    pub fn get(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}
