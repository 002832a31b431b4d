//! Abstract memory budget interfaces.
//!
//! The concrete implementation lives in `chainbuf-mem`. Only traits here, so
//! any crate can depend on the API without pulling in the accounting logic.
//! The growable backend acquires its capacity through a budget; a denied
//! acquire is the "capacity exhausted" failure mode surfaced by `grow`.

/// A guard returned by a memory budget when bytes are acquired.
///
/// Must be RAII (releases on Drop), `Send`, and panic-safe.
pub trait BudgetGuard: Send {
    /// Number of bytes currently accounted for by this guard.
    fn bytes(&self) -> usize;
    /// Optional debug tag for metrics/tracing.
    fn tag(&self) -> &'static str {
        "guard"
    }
}

/// A handle representing a byte-cap enforcer.
///
/// Backends call `try_acquire` before taking storage. If `None` is returned
/// they must fail their `grow` with an exhaustion error, never allocate
/// anyway.
pub trait MemoryBudget: Send + Sync + 'static {
    type Guard: BudgetGuard;

    /// Attempt to acquire `bytes` from the live budget. Returns a guard on
    /// success.
    fn try_acquire(&self, bytes: usize, tag: &'static str) -> Option<Self::Guard>;

    /// Total configured capacity (bytes).
    fn capacity_bytes(&self) -> usize;

    /// Approximate currently used bytes (advisory; not a correctness API).
    fn used_bytes(&self) -> usize;
}

// NOTE: no default impls that would silently "allow" acquisition. The mem
// crate is the only place where guards are constructed.
