//! Singular locking allocator over one buffer-chain backend.
//!
//! The adapter owns exactly one backend and exposes it through the
//! allocator-shaped contract that string/stream containers consume. It keeps
//! one piece of cached traversal state: `absolute_pos`, the absolute offset
//! of the start of the chunk the backend cursor sits on. Monotonically
//! increasing accesses resolve without touching earlier chunks; a backward
//! access resets the backend and rescans from the head, trading O(n) worst
//! case for zero extra bookkeeping in the backend.

use std::ops::{Deref, DerefMut};

use chainbuf_core::alloc::{AllocHandle, AllocatorCaps, SingularAllocator};
use chainbuf_core::error::{Error, Result};
use chainbuf_core::netbuf::NetBuf;

/// Read-only access window into backend storage. Derefs to the bytes from
/// the resolved position to the end of the containing chunk.
pub struct LockRef<D> {
    data: D,
    start: usize,
}

/// Writable access window into backend storage.
pub struct LockMut<D> {
    data: D,
    start: usize,
}

impl<D: Deref<Target = [u8]>> Deref for LockRef<D> {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.data[self.start..]
    }
}

impl<D: Deref<Target = [u8]>> Deref for LockMut<D> {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.data[self.start..]
    }
}

impl<D: DerefMut<Target = [u8]>> DerefMut for LockMut<D> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.start..]
    }
}

/// Locking allocator adapter bound to one backend instance.
pub struct NetBufAllocator<N: NetBuf> {
    netbuf: N,
    /// Absolute offset of the start of the chunk the backend cursor is on.
    absolute_pos: usize,
}

impl<N: NetBuf> NetBufAllocator<N> {
    pub fn new(netbuf: N) -> Self {
        Self {
            netbuf,
            absolute_pos: 0,
        }
    }

    pub fn netbuf(&self) -> &N {
        &self.netbuf
    }

    pub fn into_inner(self) -> N {
        self.netbuf
    }

    /// Position the backend cursor on the chunk containing absolute `pos`
    /// and return the offset of `pos` within that chunk.
    ///
    /// A position on a chunk boundary resolves to offset 0 of the *next*
    /// chunk. A position before the cached chunk start forces a reset and a
    /// rescan from the head (no backward link exists in the backend).
    fn resolve(&mut self, pos: usize) -> usize {
        if pos < self.absolute_pos {
            #[cfg(feature = "tracing")]
            tracing::trace!(pos, cached = self.absolute_pos, "position regressed; rescanning");
            self.netbuf.reset();
            self.absolute_pos = 0;
        }

        let mut local = pos - self.absolute_pos;
        while local >= self.netbuf.chunk_size() && !self.netbuf.is_last() {
            let chunk = self.netbuf.chunk_size();
            local -= chunk;
            self.absolute_pos += chunk;
            self.netbuf.advance();
        }
        local
    }
}

impl<N: NetBuf> SingularAllocator for NetBufAllocator<N> {
    type Lock<'a> = LockRef<N::Data<'a>>
    where
        Self: 'a;
    type LockMut<'a> = LockMut<N::DataMut<'a>>
    where
        Self: 'a;

    const CAPS: AllocatorCaps = AllocatorCaps {
        stateful: true,
        singular: true,
        locking: true,
        sized: true,
        contiguous: false,
    };

    fn allocate(&mut self, _size: usize) -> AllocHandle {
        // Already bound at construction; a second allocation is a checkable
        // "no", not a crash.
        AllocHandle::Invalid
    }

    fn allocate_with_size(&mut self, _size: usize) -> Option<(AllocHandle, usize)> {
        None
    }

    fn reallocate_with_size(
        &mut self,
        _handle: AllocHandle,
        _size: usize,
    ) -> Option<(AllocHandle, usize)> {
        None
    }

    fn deallocate(&mut self, _handle: AllocHandle, _count: usize) {}

    fn lock(&mut self, _handle: AllocHandle, pos: usize, count: usize) -> Self::LockMut<'_> {
        let start = self.resolve(pos);
        debug_assert!(
            count <= self.netbuf.chunk_size().saturating_sub(start),
            "lock of {count} bytes at pos {pos} crosses the chunk boundary; query max_lock_size first"
        );
        LockMut {
            data: self.netbuf.data_mut(),
            start,
        }
    }

    fn lock_shared(&mut self, _handle: AllocHandle, pos: usize, count: usize) -> Self::Lock<'_> {
        let start = self.resolve(pos);
        debug_assert!(
            count <= self.netbuf.chunk_size().saturating_sub(start),
            "shared lock of {count} bytes at pos {pos} crosses the chunk boundary"
        );
        LockRef {
            data: self.netbuf.data(),
            start,
        }
    }

    fn unlock(&mut self, _handle: AllocHandle) {}

    fn unlock_shared(&self, _handle: AllocHandle) {}

    fn size(&self, _handle: AllocHandle) -> usize {
        self.netbuf.total_size()
    }

    fn max_lock_size(&self) -> usize {
        self.netbuf.chunk_size()
    }

    fn reallocate(&mut self, handle: AllocHandle, new_total: usize) -> Result<AllocHandle> {
        let total = self.netbuf.total_size();
        if new_total < total {
            // Growth-only contract; truncation belongs to the backend owner.
            return Err(Error::NotSupported("singular reallocate is growth-only"));
        }
        let delta = new_total - total;
        if delta == 0 {
            return Ok(handle);
        }
        self.netbuf.grow(delta, true)?;
        Ok(handle)
    }
}
