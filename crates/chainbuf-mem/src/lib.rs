#![forbid(unsafe_code)]
//! chainbuf-mem: concrete buffer-chain backends and the locking allocator.
//!
//! This crate implements the contracts defined in `chainbuf-core`:
//!
//! - [`FixedNetBuf`]: one preallocated chunk, cannot grow.
//! - [`DynamicNetBuf`]: one growable chunk with budget-accounted capacity.
//! - [`SegmentPool`] / [`PooledChain`]: the external subsystem owning
//!   reference-counted segment chains (the role a network stack's buffer
//!   pool plays).
//! - [`ExternalChainNetBuf`]: backend over one pooled chain, with explicit
//!   ownership tags.
//! - [`NetBufAllocator`]: the singular locking allocator adapter with its
//!   cached-position resolver.
//!
//! Single-threaded, synchronous access model: one adapter per backend, one
//! outstanding lock at a time. The types are `Send`/`Sync` where the
//! plumbing allows, but no operation yields or blocks on I/O.

pub mod alloc;
pub mod chain;
pub mod dynamic;
pub mod fixed;
pub mod guard;
pub mod segment;

pub use alloc::{LockMut, LockRef, NetBufAllocator};
pub use chain::{ExternalChainNetBuf, Ownership};
pub use dynamic::DynamicNetBuf;
pub use fixed::FixedNetBuf;
pub use guard::{ByteBudget, ByteGuard};
pub use segment::{PooledChain, SegmentPool};
