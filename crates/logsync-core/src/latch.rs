//! Re-entrancy latch for the selection handler
//!
//! At most one handler body runs at a time. A second event arriving while the
//! latch is held is dropped, not queued.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct BusyLatch {
    busy: AtomicBool,
}

impl BusyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the latch, or `None` if it is already held.
    pub fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| BusyGuard { latch: self })
    }

    pub fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the latch when dropped, including during unwinding.
#[derive(Debug)]
pub struct BusyGuard<'a> {
    latch: &'a BusyLatch,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.latch.busy.store(false, Ordering::Release);
    }
}
