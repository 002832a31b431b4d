//! Buffer-chain backend contract.
//!
//! A backend stores one logical byte sequence as a chain of chunks and keeps
//! a forward-only cursor over them. Three storage strategies implement this
//! in `chainbuf-mem`: a fixed preallocated chunk, a growable single chunk,
//! and a chain of externally reference-counted segments.
//!
//! The cursor only moves forward (`advance`) or back to the head (`reset`);
//! there is no backward link, so callers that need an earlier position must
//! reset and rescan. The allocator adapter caches traversal state so that
//! monotonically increasing accesses never rescan.

use std::ops::{Deref, DerefMut};

use crate::error::Result;

/// One chained byte store. All operations run to completion on the caller's
/// thread; nothing here suspends or blocks on I/O.
///
/// Chunk access uses generic associated types so backends can hand out
/// either plain slices or guard-backed views; either way the returned value
/// borrows the backend, which makes "reference stays valid until the next
/// structural mutation" a compile-time fact rather than a documented hope.
pub trait NetBuf {
    /// Read view of the current chunk.
    type Data<'a>: Deref<Target = [u8]>
    where
        Self: 'a;
    /// Write view of the current chunk.
    type DataMut<'a>: DerefMut<Target = [u8]>
    where
        Self: 'a;

    /// Bytes in the chunk the cursor is positioned at. Side-effect-free.
    fn chunk_size(&self) -> usize;

    /// Cumulative bytes across the full chain from the head, regardless of
    /// cursor position. May cost O(chain length) for chained backends.
    ///
    /// Invariant: `total_size() >= chunk_size()`.
    fn total_size(&self) -> usize;

    /// The current chunk's bytes.
    fn data(&self) -> Self::Data<'_>;

    /// The current chunk's bytes, writable.
    fn data_mut(&mut self) -> Self::DataMut<'_>;

    /// Move the cursor to the next chunk if one exists. Returns whether a
    /// next chunk existed; `false` means "already at the last chunk", not an
    /// error, and the cursor does not move.
    fn advance(&mut self) -> bool;

    /// Move the cursor back to the head chunk. Always succeeds.
    fn reset(&mut self);

    /// True when `advance` would have no effect.
    fn is_last(&self) -> bool;

    /// Attempt to add `delta` bytes of capacity, preserving existing bytes
    /// at their absolute offsets. `extend_chain` permits appending chunks for
    /// backends that chain.
    ///
    /// Fixed backends always fail with [`Error::FixedCapacity`]; growable
    /// backends fail only on exhaustion; external chains report
    /// [`Error::NotSupported`]. Never partially succeeds.
    ///
    /// [`Error::FixedCapacity`]: crate::error::Error::FixedCapacity
    /// [`Error::NotSupported`]: crate::error::Error::NotSupported
    fn grow(&mut self, delta: usize, extend_chain: bool) -> Result<()>;
}
