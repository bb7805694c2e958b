use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lp_collections::{heap_sort, MinHeap};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("min_heap_add_10k", |b| {
        b.iter_batched(
            || lcg(1).take(10_000).collect::<Vec<_>>(),
            |xs| {
                let mut h = MinHeap::with_capacity(xs.len());
                for x in xs {
                    h.add(x);
                }
                black_box(h)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_add_remove_cycle(c: &mut Criterion) {
    c.bench_function("min_heap_add_remove_cycle", |b| {
        let mut h: MinHeap<u64> = lcg(3).take(10_000).collect();
        let mut xs = lcg(5);
        b.iter(|| {
            h.add(xs.next().unwrap());
            black_box(h.remove().unwrap());
        })
    });
}

fn bench_heap_sort(c: &mut Criterion) {
    c.bench_function("heap_sort_10k", |b| {
        b.iter_batched(
            || lcg(9).take(10_000).collect::<Vec<_>>(),
            |xs| black_box(heap_sort(xs)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_add, bench_add_remove_cycle, bench_heap_sort
}
criterion_main!(benches);
