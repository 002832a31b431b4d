#![forbid(unsafe_code)]
//! chainbuf: chained network buffers behind a singular locking allocator.
//!
//! Facade over the workspace crates. Most users want a backend from
//! `chainbuf-mem`, wrap it in [`NetBufAllocator`], and drive it with the
//! stream containers from `chainbuf-stream`.

pub use chainbuf_core::alloc::{AllocHandle, AllocatorCaps, SingularAllocator};
pub use chainbuf_core::budget::{BudgetGuard, MemoryBudget};
pub use chainbuf_core::config::{PoolConfig, WriterPolicy};
pub use chainbuf_core::error::{Error, Result};
pub use chainbuf_core::netbuf::NetBuf;
pub use chainbuf_core::transport::{DatagramTransport, ReceiveSink};
pub use chainbuf_mem::{
    ByteBudget, ByteGuard, DynamicNetBuf, ExternalChainNetBuf, FixedNetBuf, NetBufAllocator,
    Ownership, PooledChain, SegmentPool,
};
pub use chainbuf_stream::{NetBufReader, NetBufWriter};
