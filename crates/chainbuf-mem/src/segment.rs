//! External segment pool: reference-counted chains owned outside the
//! backend layer.
//!
//! This plays the role a network stack's buffer pool plays: a receive path
//! allocates a chain here, hands it to consumers, and an explicit
//! protocol-level reference count decides when the segment storage goes back
//! to the pool. The count is *not* the Rust `Arc` handle count — cloning a
//! [`PooledChain`] handle is free and deliberately does not touch it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use chainbuf_core::config::PoolConfig;
use chainbuf_core::error::{Error, Result};

struct PoolShared {
    config: PoolConfig,
    live_bytes: AtomicUsize,
    live_chains: AtomicUsize,
}

impl PoolShared {
    fn try_acquire(&self, bytes: usize) -> bool {
        loop {
            let cur = self.live_bytes.load(Ordering::Relaxed);
            let next = cur.saturating_add(bytes);
            if next > self.config.capacity_bytes {
                return false;
            }
            if self
                .live_bytes
                .compare_exchange(cur, next, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
            {
                return true;
            }
        }
    }

    fn release(&self, bytes: usize) {
        self.live_bytes.fetch_sub(bytes, Ordering::AcqRel);
    }
}

/// Allocates reference-counted segment chains against a hard byte cap.
#[derive(Clone)]
pub struct SegmentPool {
    shared: Arc<PoolShared>,
}

impl SegmentPool {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            shared: Arc::new(PoolShared {
                config,
                live_bytes: AtomicUsize::new(0),
                live_chains: AtomicUsize::new(0),
            }),
        }
    }

    /// Allocate a chain of `total_size` zeroed bytes, split into
    /// `segment_size` chunks plus one trailing partial chunk. The chain
    /// starts with a reference count of 1, owned by the caller.
    pub fn alloc_chain(&self, total_size: usize) -> Result<PooledChain> {
        if !self.shared.try_acquire(total_size) {
            return Err(Error::Exhausted {
                requested: total_size,
                capacity: self.shared.config.capacity_bytes,
                used: self.shared.live_bytes.load(Ordering::Relaxed),
            });
        }

        let seg = self.shared.config.segment_size.max(1);
        let mut segments = Vec::with_capacity(total_size.div_ceil(seg));
        let mut remaining = total_size;
        while remaining > 0 {
            let len = remaining.min(seg);
            segments.push(vec![0u8; len]);
            remaining -= len;
        }

        self.shared.live_chains.fetch_add(1, Ordering::AcqRel);
        #[cfg(feature = "tracing")]
        tracing::trace!(total_size, segments = segments.len(), "chain allocated");

        Ok(PooledChain {
            inner: Arc::new(ChainInner {
                refs: AtomicUsize::new(1),
                state: Mutex::new(ChainState {
                    segments,
                    released: false,
                }),
                pool: Arc::clone(&self.shared),
            }),
        })
    }

    /// Bytes currently held by live chains.
    pub fn live_bytes(&self) -> usize {
        self.shared.live_bytes.load(Ordering::Relaxed)
    }

    /// Number of chains not yet released.
    pub fn live_chains(&self) -> usize {
        self.shared.live_chains.load(Ordering::Relaxed)
    }

    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }
}

struct ChainState {
    segments: Vec<Vec<u8>>,
    released: bool,
}

impl ChainState {
    fn total_len(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

struct ChainInner {
    /// Protocol-level reference count. Starts at 1 for the allocating owner.
    refs: AtomicUsize,
    state: Mutex<ChainState>,
    pool: Arc<PoolShared>,
}

/// Handle to one pooled chain.
///
/// Cloning the handle does not change the reference count; only
/// [`incref`](Self::incref) and [`decref`](Self::decref) do. When the count
/// reaches zero the segment storage is returned to the pool exactly once;
/// surviving handles observe an empty, released chain.
#[derive(Clone)]
pub struct PooledChain {
    inner: Arc<ChainInner>,
}

impl std::fmt::Debug for PooledChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledChain")
            .field("refs", &self.ref_count())
            .finish_non_exhaustive()
    }
}

impl PooledChain {
    /// Current protocol-level reference count.
    pub fn ref_count(&self) -> usize {
        self.inner.refs.load(Ordering::Acquire)
    }

    /// Take one more reference. Callers that keep the chain past the scope
    /// that handed it to them must do this (or receive ownership by move).
    pub fn incref(&self) {
        let prev = self.inner.refs.fetch_add(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "incref on a released chain");
    }

    /// Drop one reference. Returns `true` when this call released the
    /// storage back to the pool.
    pub fn decref(&self) -> bool {
        let prev = self.inner.refs.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "decref underflow");
        if prev == 1 {
            self.release_storage();
            true
        } else {
            false
        }
    }

    pub fn is_released(&self) -> bool {
        self.inner.state.lock().released
    }

    /// Number of segments in the chain. Released chains keep their segment
    /// slots (emptied), so cursors held by stale wrappers stay in range.
    pub fn segment_count(&self) -> usize {
        self.inner.state.lock().segments.len()
    }

    /// Length of segment `idx`; 0 when out of range or released.
    pub fn segment_len(&self, idx: usize) -> usize {
        self.inner
            .state
            .lock()
            .segments
            .get(idx)
            .map_or(0, Vec::len)
    }

    /// Cumulative length across all segments. O(chain length).
    pub fn total_len(&self) -> usize {
        self.inner.state.lock().total_len()
    }

    /// Read view of segment `idx`. Empty when out of range or released.
    pub fn segment(&self, idx: usize) -> MappedMutexGuard<'_, [u8]> {
        MutexGuard::map(self.inner.state.lock(), |s| {
            match s.segments.get_mut(idx) {
                Some(seg) => seg.as_mut_slice(),
                None => &mut [],
            }
        })
    }

    /// Write view of segment `idx`.
    pub fn segment_mut(&self, idx: usize) -> MappedMutexGuard<'_, [u8]> {
        self.segment(idx)
    }

    /// Copy `bytes` into the chain starting at absolute position `pos`,
    /// crossing segment boundaries as needed. This is the producer-side fill
    /// (a receive callback writing an incoming datagram).
    pub fn write_at(&self, pos: usize, bytes: &[u8]) -> Result<()> {
        let mut state = self.inner.state.lock();
        if pos + bytes.len() > state.total_len() {
            return Err(Error::Invariant(format!(
                "write_at past end of chain: pos {} + len {} > total {}",
                pos,
                bytes.len(),
                state.total_len()
            )));
        }
        let mut offset = pos;
        let mut src = bytes;
        for seg in state.segments.iter_mut() {
            if src.is_empty() {
                break;
            }
            if offset >= seg.len() {
                offset -= seg.len();
                continue;
            }
            let n = (seg.len() - offset).min(src.len());
            seg[offset..offset + n].copy_from_slice(&src[..n]);
            src = &src[n..];
            offset = 0;
        }
        Ok(())
    }

    /// Copy out of the chain starting at absolute position `pos`. Returns
    /// the number of bytes copied (short when the chain ends first).
    pub fn read_at(&self, pos: usize, out: &mut [u8]) -> usize {
        let state = self.inner.state.lock();
        let mut offset = pos;
        let mut copied = 0;
        for seg in state.segments.iter() {
            if copied == out.len() {
                break;
            }
            if offset >= seg.len() {
                offset -= seg.len();
                continue;
            }
            let n = (seg.len() - offset).min(out.len() - copied);
            out[copied..copied + n].copy_from_slice(&seg[offset..offset + n]);
            copied += n;
            offset = 0;
        }
        copied
    }

    /// Truncate the chain to `new_total` bytes, returning trailing segment
    /// storage to the pool. A no-op when `new_total` is not smaller.
    pub fn truncate(&self, new_total: usize) {
        let mut state = self.inner.state.lock();
        let total = state.total_len();
        if new_total >= total || state.released {
            return;
        }

        let mut kept = 0;
        let mut keep_segments = 0;
        for seg in state.segments.iter_mut() {
            if kept >= new_total {
                break;
            }
            let take = (new_total - kept).min(seg.len());
            seg.truncate(take);
            kept += take;
            keep_segments += 1;
        }
        state.segments.truncate(keep_segments);

        let freed = total - kept;
        self.inner.pool.release(freed);
        #[cfg(feature = "tracing")]
        tracing::trace!(new_total, freed, "chain truncated");
    }

    fn release_storage(&self) {
        let mut state = self.inner.state.lock();
        if state.released {
            return;
        }
        let freed = state.total_len();
        for seg in state.segments.iter_mut() {
            *seg = Vec::new();
        }
        state.released = true;
        self.inner.pool.release(freed);
        self.inner.pool.live_chains.fetch_sub(1, Ordering::AcqRel);
        #[cfg(feature = "tracing")]
        tracing::trace!(freed, "chain released to pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(segment_size: usize, capacity: usize) -> SegmentPool {
        SegmentPool::new(PoolConfig {
            segment_size,
            capacity_bytes: capacity,
        })
    }

    #[test]
    fn test_chain_segmentation() {
        let pool = pool(16, 1024);
        let chain = pool.alloc_chain(40).expect("alloc failed");

        assert_eq!(chain.segment_count(), 3);
        assert_eq!(chain.segment_len(0), 16);
        assert_eq!(chain.segment_len(1), 16);
        assert_eq!(chain.segment_len(2), 8);
        assert_eq!(chain.total_len(), 40);
        assert_eq!(pool.live_bytes(), 40);
        assert_eq!(pool.live_chains(), 1);
    }

    #[test]
    fn test_pool_capacity_enforced() {
        let pool = pool(16, 64);
        let _chain = pool.alloc_chain(48).expect("first alloc failed");

        let err = pool.alloc_chain(32).expect_err("should exceed capacity");
        assert!(matches!(
            err,
            chainbuf_core::error::Error::Exhausted { requested: 32, .. }
        ));
    }

    #[test]
    fn test_truncate_returns_bytes() {
        let pool = pool(16, 1024);
        let chain = pool.alloc_chain(48).expect("alloc failed");

        chain.truncate(20);
        assert_eq!(chain.total_len(), 20);
        assert_eq!(chain.segment_count(), 2);
        assert_eq!(chain.segment_len(1), 4);
        assert_eq!(pool.live_bytes(), 20);

        // Release returns the rest.
        assert!(chain.decref());
        assert_eq!(pool.live_bytes(), 0);
        assert_eq!(pool.live_chains(), 0);
    }

    #[test]
    fn test_write_read_across_segments() {
        let pool = pool(4, 1024);
        let chain = pool.alloc_chain(12).expect("alloc failed");

        chain.write_at(2, b"abcdefgh").expect("write_at failed");
        let mut out = [0u8; 8];
        assert_eq!(chain.read_at(2, &mut out), 8);
        assert_eq!(&out, b"abcdefgh");
    }
}
