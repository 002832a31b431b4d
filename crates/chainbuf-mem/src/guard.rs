//! MemoryBudget + RAII guard implementations.
//!
//! The growable backend must acquire a guard before taking capacity.
//! Dropping the guard returns the bytes to the budget (panic-safe).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chainbuf_core::budget::{BudgetGuard, MemoryBudget};

/// Shared inner state for the budget.
struct BudgetInner {
    capacity: usize,
    used: AtomicUsize,
}

impl BudgetInner {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            used: AtomicUsize::new(0),
        }
    }

    fn try_acquire(&self, bytes: usize) -> bool {
        loop {
            let cur = self.used.load(Ordering::Relaxed);
            let next = cur.saturating_add(bytes);
            if next > self.capacity {
                return false;
            }
            if self
                .used
                .compare_exchange(cur, next, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return true;
            }
        }
    }

    fn release(&self, bytes: usize) {
        self.used.fetch_sub(bytes, Ordering::AcqRel);
    }
}

/// Concrete byte budget backing dynamic backends.
#[derive(Clone)]
pub struct ByteBudget {
    inner: Arc<BudgetInner>,
}

impl ByteBudget {
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            inner: Arc::new(BudgetInner::new(capacity_bytes)),
        }
    }

    /// Budget that never denies. For callers that want an unaccounted
    /// dynamic backend.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// Current usage (advisory).
    pub fn used_bytes(&self) -> usize {
        self.inner.used.load(Ordering::Relaxed)
    }

    pub fn capacity_bytes(&self) -> usize {
        self.inner.capacity
    }
}

/// RAII guard accounting for a number of bytes. Dropping it returns the
/// bytes to the budget.
pub struct ByteGuard {
    inner: Arc<BudgetInner>,
    bytes: usize,
    tag: &'static str,
}

impl Drop for ByteGuard {
    fn drop(&mut self) {
        if self.bytes > 0 {
            self.inner.release(self.bytes);
            self.bytes = 0;
        }
    }
}

impl BudgetGuard for ByteGuard {
    fn bytes(&self) -> usize {
        self.bytes
    }
    fn tag(&self) -> &'static str {
        self.tag
    }
}

impl ByteGuard {
    /// Try to resize this guard to a new byte count. Shrinking always
    /// succeeds; growing succeeds only if the budget can cover the delta.
    pub fn try_resize(&mut self, new_bytes: usize) -> bool {
        if new_bytes == self.bytes {
            return true;
        }

        if new_bytes < self.bytes {
            let delta = self.bytes - new_bytes;
            self.inner.release(delta);
            self.bytes = new_bytes;
            true
        } else {
            let delta = new_bytes - self.bytes;
            if self.inner.try_acquire(delta) {
                self.bytes = new_bytes;
                true
            } else {
                false
            }
        }
    }

    /// Capacity of the budget this guard draws from.
    pub fn budget_capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Current usage of the budget this guard draws from (advisory).
    pub fn budget_used(&self) -> usize {
        self.inner.used.load(Ordering::Relaxed)
    }
}

impl MemoryBudget for ByteBudget {
    type Guard = ByteGuard;

    fn try_acquire(&self, bytes: usize, tag: &'static str) -> Option<Self::Guard> {
        if bytes == 0 {
            return Some(ByteGuard {
                inner: Arc::clone(&self.inner),
                bytes: 0,
                tag,
            });
        }
        if self.inner.try_acquire(bytes) {
            Some(ByteGuard {
                inner: Arc::clone(&self.inner),
                bytes,
                tag,
            })
        } else {
            None
        }
    }

    fn capacity_bytes(&self) -> usize {
        self.inner.capacity
    }

    fn used_bytes(&self) -> usize {
        self.inner.used.load(Ordering::Relaxed)
    }
}
