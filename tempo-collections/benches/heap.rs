use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use tempo_collections::{IndexedHeap, MinHeap, Pool};

// ==================== Helpers ====================

fn scrambled(n: usize) -> Vec<u32> {
    (0..n as u32).map(|i| (i * 7 + 13) % n as u32).collect()
}

// ==================== FixedHeap ====================

fn bench_heap_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_heap");

    for size in [64usize, 1024] {
        let values = scrambled(size);

        group.bench_with_input(BenchmarkId::new("push_all", size), &values, |b, values| {
            b.iter(|| {
                let mut heap: MinHeap<u32> = MinHeap::with_capacity(values.len());
                for &v in values {
                    heap.try_push(black_box(v)).unwrap();
                }
                heap
            })
        });

        group.bench_with_input(BenchmarkId::new("push_pop_all", size), &values, |b, values| {
            b.iter(|| {
                let mut heap: MinHeap<u32> = MinHeap::with_capacity(values.len());
                for &v in values {
                    heap.try_push(v).unwrap();
                }
                while let Some(v) = heap.pop() {
                    black_box(v);
                }
            })
        });
    }

    group.finish();
}

fn bench_heap_remove_at(c: &mut Criterion) {
    c.bench_function("fixed_heap/remove_interior_64", |b| {
        let values = scrambled(64);
        b.iter(|| {
            let mut heap: MinHeap<u32> = MinHeap::with_capacity(64);
            for &v in &values {
                heap.try_push(v).unwrap();
            }
            while heap.len() > 1 {
                let pos = heap.len() / 2;
                black_box(heap.remove_at(pos));
            }
        })
    });
}

// ==================== IndexedHeap ====================

fn bench_indexed_update(c: &mut Criterion) {
    c.bench_function("indexed_heap/relax_1024", |b| {
        b.iter(|| {
            let mut heap: IndexedHeap<i32> = IndexedHeap::with_capacity(1024);
            for id in 0..1024 {
                heap.insert(id, ((id * 7 + 13) % 1024) as i32);
            }
            // Relaxation-style churn: decrease half the keys, then drain.
            for id in (0..1024).step_by(2) {
                heap.decrease_key(id, -((id % 512) as i32));
            }
            while let Some(entry) = heap.pop_min() {
                black_box(entry);
            }
        })
    });
}

// ==================== Pool ====================

fn bench_pool_churn(c: &mut Criterion) {
    c.bench_function("pool/insert_remove_1024", |b| {
        b.iter(|| {
            let mut pool: Pool<u64> = Pool::with_capacity(1024);
            let mut keys = Vec::with_capacity(1024);
            for i in 0..1024u64 {
                keys.push(pool.try_insert(i).unwrap());
            }
            for key in keys.drain(..) {
                black_box(pool.remove(key));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_heap_push_pop,
    bench_heap_remove_at,
    bench_indexed_update,
    bench_pool_churn
);
criterion_main!(benches);
