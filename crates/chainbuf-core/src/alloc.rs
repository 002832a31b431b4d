//! Singular locking-allocator contract.
//!
//! Generic containers (strings, stream writers) talk to storage through an
//! allocator-shaped interface. A *singular* allocator represents exactly one
//! allocation that is already bound at construction: `allocate` is a
//! checkable "no", `deallocate` is a no-op, and the only mutating entry
//! point is `reallocate`. Positioned access goes through `lock`/`unlock`
//! pairs keyed by absolute byte offset.

use std::ops::{Deref, DerefMut};

use crate::error::Result;

/// Capability descriptor consulted by generic container code.
///
/// Replaces runtime tag dispatch with an explicit record attached to each
/// allocator as an associated const.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorCaps {
    /// Carries per-instance state (cannot be used as a zero-sized policy).
    pub stateful: bool,
    /// Exactly one pre-bound allocation; further `allocate` calls fail.
    pub singular: bool,
    /// Access requires `lock`/`unlock` pairing.
    pub locking: bool,
    /// `size` reports a meaningful total.
    pub sized: bool,
    /// Storage is one contiguous run (false for chained backends).
    pub contiguous: bool,
}

/// Handle to the singular allocation. Only two states exist because the
/// backend models one already-allocated entity, not a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocHandle {
    /// The one pre-bound allocation.
    Bound,
    /// Sentinel returned by operations that cannot allocate.
    Invalid,
}

impl AllocHandle {
    pub fn is_valid(self) -> bool {
        matches!(self, AllocHandle::Bound)
    }
}

/// Allocator over exactly one pre-bound byte sequence.
///
/// # Locking
///
/// `lock` returns an access window into backend storage starting at an
/// absolute position. The window borrows the allocator mutably, so exactly
/// one lock can be outstanding and no `reallocate` can run while it lives;
/// the single-outstanding-lock contract is enforced by the borrow checker.
/// `unlock` is kept as an explicit call so callers observe the pairing and a
/// future allocator requiring true exclusivity can be substituted without
/// touching container code.
///
/// # Misuse
///
/// Locking more than `max_lock_size()` bytes is a caller contract violation,
/// not a checked error; callers must query `max_lock_size()` first.
pub trait SingularAllocator {
    /// Read-only access window returned by [`lock_shared`](Self::lock_shared).
    type Lock<'a>: Deref<Target = [u8]>
    where
        Self: 'a;
    /// Writable access window returned by [`lock`](Self::lock).
    type LockMut<'a>: DerefMut<Target = [u8]>
    where
        Self: 'a;

    const CAPS: AllocatorCaps;

    /// Always fails for a singular allocator: the backend is already bound.
    /// Returns [`AllocHandle::Invalid`], never panics.
    fn allocate(&mut self, size: usize) -> AllocHandle;

    /// Size-returning variant of `allocate`. Always `None` here.
    fn allocate_with_size(&mut self, size: usize) -> Option<(AllocHandle, usize)>;

    /// Size-returning variant of `reallocate`. Always `None` here.
    fn reallocate_with_size(
        &mut self,
        handle: AllocHandle,
        size: usize,
    ) -> Option<(AllocHandle, usize)>;

    /// No-op: the backend's memory is tied to the allocator's own lifetime,
    /// not to allocate/deallocate pairs.
    fn deallocate(&mut self, handle: AllocHandle, count: usize);

    /// Writable window over at least `count` bytes starting at absolute
    /// position `pos`. Precondition: `count <= max_lock_size()`.
    fn lock(&mut self, handle: AllocHandle, pos: usize, count: usize) -> Self::LockMut<'_>;

    /// Read-only counterpart of `lock`. May still move the backend cursor.
    fn lock_shared(&mut self, handle: AllocHandle, pos: usize, count: usize) -> Self::Lock<'_>;

    /// Release a window taken with `lock`.
    fn unlock(&mut self, handle: AllocHandle);

    /// Release a window taken with `lock_shared`.
    fn unlock_shared(&self, handle: AllocHandle);

    /// Total size of the bound allocation.
    fn size(&self, handle: AllocHandle) -> usize;

    /// Safe upper bound for a single `lock` without crossing a chunk
    /// boundary: the backend's current chunk size.
    fn max_lock_size(&self) -> usize;

    /// Grow the bound allocation to `new_total` bytes. The only mutating
    /// entry point; locking never grows. Failures surface as `Err`, and the
    /// caller must treat them as "write cannot proceed".
    fn reallocate(&mut self, handle: AllocHandle, new_total: usize) -> Result<AllocHandle>;
}
