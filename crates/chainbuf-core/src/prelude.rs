//! Convenient re-exports for downstream crates.

pub use crate::alloc::{AllocHandle, AllocatorCaps, SingularAllocator};
pub use crate::budget::{BudgetGuard, MemoryBudget};
pub use crate::config::{PoolConfig, WriterPolicy};
pub use crate::error::{Error, Result};
pub use crate::netbuf::NetBuf;
pub use crate::transport::{DatagramTransport, ReceiveSink};
