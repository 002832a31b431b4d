//! Reference-count law for external chains: increment-on-bind adds exactly
//! one, every owning wrapper releases exactly once, move transfers the
//! obligation without touching the count.

use chainbuf_core::config::PoolConfig;
use chainbuf_mem::{ExternalChainNetBuf, Ownership, PooledChain, SegmentPool};

fn chain() -> (SegmentPool, PooledChain) {
    let pool = SegmentPool::new(PoolConfig {
        segment_size: 32,
        capacity_bytes: 4096,
    });
    let c = pool.alloc_chain(64).expect("alloc failed");
    (pool, c)
}

#[test]
fn test_bind_with_bump_adds_exactly_one() {
    let (_pool, c) = chain();
    assert_eq!(c.ref_count(), 1);

    {
        let nb = ExternalChainNetBuf::bind(c.clone(), true);
        assert_eq!(c.ref_count(), 2);
        assert_eq!(nb.ownership(), Ownership::Owning);
    }
    // Wrapper dropped: back to the allocator's single reference.
    assert_eq!(c.ref_count(), 1);
    assert!(!c.is_released());
}

#[test]
fn test_bind_without_bump_takes_over_callers_reference() {
    let (pool, c) = chain();
    assert_eq!(c.ref_count(), 1);

    {
        // Ownership transferred, count untouched (the receive-path pattern).
        let _nb = ExternalChainNetBuf::bind(c.clone(), false);
        assert_eq!(c.ref_count(), 1);
    }
    // The wrapper's drop spent the one reference: storage released.
    assert_eq!(c.ref_count(), 0);
    assert!(c.is_released());
    assert_eq!(pool.live_bytes(), 0);
    assert_eq!(pool.live_chains(), 0);
}

#[test]
fn test_move_transfers_ownership_without_count_change() {
    let (_pool, c) = chain();

    let nb = ExternalChainNetBuf::bind(c.clone(), true);
    assert_eq!(c.ref_count(), 2);

    // Plain move: the obligation travels with the value, the count does not
    // change, and there is no second release from the source.
    let moved = nb;
    assert_eq!(c.ref_count(), 2);

    drop(moved);
    assert_eq!(c.ref_count(), 1);
}

#[test]
fn test_move_into_queue_then_dequeue() {
    let (_pool, c) = chain();

    let mut queue: Vec<ExternalChainNetBuf> = Vec::new();
    queue.push(ExternalChainNetBuf::bind(c.clone(), true));
    assert_eq!(c.ref_count(), 2);

    let nb = queue.pop().expect("queue was just filled");
    assert_eq!(c.ref_count(), 2);

    drop(nb);
    assert_eq!(c.ref_count(), 1);
}

#[test]
fn test_borrowed_view_never_touches_count() {
    let (_pool, c) = chain();

    {
        let nb = ExternalChainNetBuf::bind_borrowed(c.clone());
        assert_eq!(c.ref_count(), 1);
        assert_eq!(nb.ownership(), Ownership::Borrowed);
    }
    assert_eq!(c.ref_count(), 1);
    assert!(!c.is_released());
}

#[test]
fn test_early_release_is_idempotent() {
    let (_pool, c) = chain();

    let mut nb = ExternalChainNetBuf::bind(c.clone(), true);
    assert_eq!(c.ref_count(), 2);

    nb.release();
    assert_eq!(c.ref_count(), 1);
    assert_eq!(nb.ownership(), Ownership::Released);

    nb.release();
    assert_eq!(c.ref_count(), 1, "second release is a no-op");

    drop(nb);
    assert_eq!(c.ref_count(), 1, "drop after release is a no-op");
}

#[test]
fn test_release_affects_whole_chain_regardless_of_cursor() {
    use chainbuf_core::netbuf::NetBuf;

    let (pool, c) = chain();
    let mut nb = ExternalChainNetBuf::bind(c.clone(), false);

    // Advance the cursor away from the head, then drop. The retained head
    // reference releases the whole chain, not just the tail.
    nb.advance();
    drop(nb);

    assert!(c.is_released());
    assert_eq!(pool.live_bytes(), 0);
}
