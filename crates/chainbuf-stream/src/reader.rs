//! Forward reader over a singular allocator.

use chainbuf_core::alloc::{AllocHandle, SingularAllocator};

/// Reads through shared locks, one chunk window at a time. Forward-only:
/// positions only move ahead, which keeps the adapter's cached traversal
/// state aligned and avoids rescans.
pub struct NetBufReader<A: SingularAllocator> {
    alloc: A,
    pos: usize,
}

impl<A: SingularAllocator> NetBufReader<A> {
    pub fn new(alloc: A) -> Self {
        Self { alloc, pos: 0 }
    }

    /// Absolute read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the read position and the end of the allocation.
    pub fn remaining(&self) -> usize {
        self.alloc.size(AllocHandle::Bound).saturating_sub(self.pos)
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    pub fn into_inner(self) -> A {
        self.alloc
    }

    /// Copy up to `out.len()` bytes into `out`. Returns the number copied;
    /// short reads mean the allocation ended.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let total = self.alloc.size(AllocHandle::Bound);
        let mut read = 0;
        while read < out.len() && self.pos < total {
            let window = self.alloc.lock_shared(AllocHandle::Bound, self.pos, 0);
            let n = window
                .len()
                .min(out.len() - read)
                .min(total - self.pos);
            out[read..read + n].copy_from_slice(&window[..n]);
            drop(window);
            self.alloc.unlock_shared(AllocHandle::Bound);

            if n == 0 {
                break;
            }
            read += n;
            self.pos += n;
        }
        read
    }

    /// Skip forward `n` bytes (clamped to the end of the allocation).
    pub fn skip(&mut self, n: usize) {
        let total = self.alloc.size(AllocHandle::Bound);
        self.pos = (self.pos + n).min(total);
    }
}
