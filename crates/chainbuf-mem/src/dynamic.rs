//! Growable single-chunk backend with budget-accounted capacity.

use chainbuf_core::budget::MemoryBudget;
use chainbuf_core::error::{Error, Result};
use chainbuf_core::netbuf::NetBuf;

use crate::guard::ByteGuard;

/// One logical chunk over a reallocating buffer. Starts empty; `grow`
/// resizes in place (preserving existing bytes at their absolute offsets)
/// and fails only when the budget denies the delta.
pub struct DynamicNetBuf {
    guard: ByteGuard,
    buf: Vec<u8>,
}

impl DynamicNetBuf {
    /// Empty backend accounted against `budget`. Acquiring zero bytes cannot
    /// be denied by a conforming budget.
    pub fn new(budget: &impl MemoryBudget<Guard = ByteGuard>) -> Result<Self> {
        let guard = budget
            .try_acquire(0, "dynamic-netbuf")
            .ok_or(Error::Exhausted {
                requested: 0,
                capacity: budget.capacity_bytes(),
                used: budget.used_bytes(),
            })?;
        Ok(Self {
            guard,
            buf: Vec::new(),
        })
    }

    /// Backend pre-sized to `len` zeroed bytes.
    pub fn with_len(budget: &impl MemoryBudget<Guard = ByteGuard>, len: usize) -> Result<Self> {
        let guard = budget
            .try_acquire(len, "dynamic-netbuf")
            .ok_or(Error::Exhausted {
                requested: len,
                capacity: budget.capacity_bytes(),
                used: budget.used_bytes(),
            })?;
        Ok(Self {
            guard,
            buf: vec![0u8; len],
        })
    }

    /// Bytes currently accounted for by this backend's guard.
    pub fn accounted_bytes(&self) -> usize {
        use chainbuf_core::budget::BudgetGuard;
        self.guard.bytes()
    }
}

impl NetBuf for DynamicNetBuf {
    type Data<'a> = &'a [u8]
    where
        Self: 'a;
    type DataMut<'a> = &'a mut [u8]
    where
        Self: 'a;

    fn chunk_size(&self) -> usize {
        self.buf.len()
    }

    fn total_size(&self) -> usize {
        self.buf.len()
    }

    fn data(&self) -> Self::Data<'_> {
        &self.buf
    }

    fn data_mut(&mut self) -> Self::DataMut<'_> {
        &mut self.buf
    }

    fn advance(&mut self) -> bool {
        false
    }

    fn reset(&mut self) {}

    fn is_last(&self) -> bool {
        true
    }

    fn grow(&mut self, delta: usize, _extend_chain: bool) -> Result<()> {
        if delta == 0 {
            return Ok(());
        }
        let new_len = self.buf.len().saturating_add(delta);
        if !self.guard.try_resize(new_len) {
            return Err(Error::Exhausted {
                requested: delta,
                capacity: self.guard.budget_capacity(),
                used: self.guard.budget_used(),
            });
        }
        // Vec::resize reallocates and copies; absolute offsets are preserved.
        self.buf.resize(new_len, 0u8);
        #[cfg(feature = "tracing")]
        tracing::trace!(delta, new_len, "dynamic netbuf grew");
        Ok(())
    }
}
