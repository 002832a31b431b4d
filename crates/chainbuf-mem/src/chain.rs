//! External-chain backend over pool-owned, reference-counted segments.

use parking_lot::MappedMutexGuard;

use chainbuf_core::error::{Error, Result};
use chainbuf_core::netbuf::NetBuf;

use crate::segment::PooledChain;

/// How a wrapper relates to the chain reference it holds. Transfer moves
/// the tag with the wrapper; it is never duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Holds one protocol reference; drops it exactly once on destruction.
    Owning,
    /// Transient view; neither takes nor drops a reference.
    Borrowed,
    /// Reference already given up; destruction is a no-op.
    Released,
}

/// Backend over one [`PooledChain`]. The head reference is retained
/// separately from the traversal cursor, so releasing always affects the
/// whole chain no matter how far traversal advanced.
pub struct ExternalChainNetBuf {
    chain: PooledChain,
    cursor: usize,
    ownership: Ownership,
}

impl ExternalChainNetBuf {
    /// Bind a chain. With `bump_ref = true` (the usual case) the wrapper
    /// takes its own reference; with `false` it assumes the caller's
    /// reference instead — the transport receive path does this because
    /// ownership of the incoming buffer transfers to the consumer.
    ///
    /// Either way the wrapper is `Owning` and decrements exactly once when
    /// dropped. Moving the wrapper transfers that obligation with it.
    pub fn bind(chain: PooledChain, bump_ref: bool) -> Self {
        if bump_ref {
            chain.incref();
        }
        Self {
            chain,
            cursor: 0,
            ownership: Ownership::Owning,
        }
    }

    /// Non-owning view over a chain someone else keeps alive. No reference
    /// count change on construction or destruction.
    pub fn bind_borrowed(chain: PooledChain) -> Self {
        Self {
            chain,
            cursor: 0,
            ownership: Ownership::Borrowed,
        }
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// The underlying chain handle.
    pub fn chain(&self) -> &PooledChain {
        &self.chain
    }

    /// Give up this wrapper's reference early. Idempotent; after this the
    /// wrapper's destruction is a no-op.
    pub fn release(&mut self) {
        if self.ownership == Ownership::Owning {
            self.chain.decref();
        }
        self.ownership = Ownership::Released;
    }

    /// Truncate the chain to `new_total` bytes, returning trailing segments
    /// to the pool. The cursor is clamped back to the head if it now points
    /// past the end.
    pub fn shrink_to(&mut self, new_total: usize) {
        self.chain.truncate(new_total);
        if self.cursor >= self.chain.segment_count() {
            self.cursor = 0;
        }
    }
}

impl Drop for ExternalChainNetBuf {
    fn drop(&mut self) {
        if self.ownership == Ownership::Owning {
            self.chain.decref();
        }
    }
}

impl NetBuf for ExternalChainNetBuf {
    type Data<'a> = MappedMutexGuard<'a, [u8]>
    where
        Self: 'a;
    type DataMut<'a> = MappedMutexGuard<'a, [u8]>
    where
        Self: 'a;

    fn chunk_size(&self) -> usize {
        self.chain.segment_len(self.cursor)
    }

    // O(chain length): walks the linked segments.
    fn total_size(&self) -> usize {
        self.chain.total_len()
    }

    fn data(&self) -> Self::Data<'_> {
        self.chain.segment(self.cursor)
    }

    fn data_mut(&mut self) -> Self::DataMut<'_> {
        self.chain.segment_mut(self.cursor)
    }

    fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.chain.segment_count() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }

    fn is_last(&self) -> bool {
        self.cursor + 1 >= self.chain.segment_count()
    }

    fn grow(&mut self, _delta: usize, _extend_chain: bool) -> Result<()> {
        // The pool does not extend bound chains; allocate a bigger chain and
        // copy if more room is needed. Truncation via `shrink_to` is the
        // only size change supported.
        Err(Error::NotSupported("external chains cannot grow"))
    }
}
