use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use chainbuf_core::alloc::{AllocHandle, SingularAllocator};
use chainbuf_core::config::PoolConfig;
use chainbuf_mem::{ExternalChainNetBuf, NetBufAllocator, PooledChain, SegmentPool};

const SEGMENT: usize = 256;
const SEGMENTS: usize = 64;

fn make_chain() -> PooledChain {
    let pool = SegmentPool::new(PoolConfig {
        segment_size: SEGMENT,
        capacity_bytes: 4 * 1024 * 1024,
    });
    pool.alloc_chain(SEGMENT * SEGMENTS)
        .expect("bench chain alloc failed")
}

fn bench_forward_traversal(c: &mut Criterion) {
    let chain = make_chain();
    c.bench_function("lock_forward", |b| {
        b.iter(|| {
            let mut a =
                NetBufAllocator::new(ExternalChainNetBuf::bind_borrowed(chain.clone()));
            let total = SEGMENT * SEGMENTS;
            let mut pos = 0;
            while pos < total {
                let window = a.lock_shared(AllocHandle::Bound, pos, 1);
                black_box(window[0]);
                drop(window);
                a.unlock_shared(AllocHandle::Bound);
                pos += 128;
            }
        })
    });
}

fn bench_regression_rescan(c: &mut Criterion) {
    let chain = make_chain();
    let far = SEGMENT * (SEGMENTS - 1);
    c.bench_function("lock_rescan", |b| {
        b.iter(|| {
            let mut a =
                NetBufAllocator::new(ExternalChainNetBuf::bind_borrowed(chain.clone()));
            // Alternating far/near positions forces a reset-and-rescan on
            // every other lock.
            for _ in 0..8 {
                let w = a.lock_shared(AllocHandle::Bound, far, 1);
                black_box(w[0]);
                drop(w);
                a.unlock_shared(AllocHandle::Bound);

                let w = a.lock_shared(AllocHandle::Bound, 3, 1);
                black_box(w[0]);
                drop(w);
                a.unlock_shared(AllocHandle::Bound);
            }
        })
    });
}

criterion_group!(benches, bench_forward_traversal, bench_regression_rescan);
criterion_main!(benches);
