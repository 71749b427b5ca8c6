use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use shardcache_core::{loader_fn, ByteView, ConcurrentCache, Group, HashRing, LruCache};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;

fn bench_lru_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_add");

    for budget in [1 << 10, 1 << 16, 0].iter() {
        group.bench_with_input(BenchmarkId::new("bytes", budget), budget, |b, &budget| {
            b.iter(|| {
                let mut cache = LruCache::new(budget);
                for i in 0..1000 {
                    cache.add(&format!("key{}", i), ByteView::from(vec![0u8; 32]));
                }
                black_box(cache.len())
            });
        });
    }

    group.finish();
}

fn bench_lru_get_hit(c: &mut Criterion) {
    let mut cache = LruCache::new(0);
    let keys: Vec<String> = (0..1000).map(|i| format!("key{}", i)).collect();
    for key in &keys {
        cache.add(key, ByteView::from(key.as_str()));
    }

    c.bench_function("lru_get_hit", |b| {
        let mut i = 0;
        b.iter(|| {
            let key = &keys[i % keys.len()];
            i += 1;
            black_box(cache.get(key).map(ByteView::len))
        });
    });
}

fn bench_concurrent_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_cache");

    for threads in [1, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("threads", threads),
            threads,
            |b, &threads| {
                b.iter(|| {
                    let cache: Arc<ConcurrentCache> = Arc::new(ConcurrentCache::new(1 << 16));
                    let handles: Vec<_> = (0..threads)
                        .map(|t| {
                            let cache = Arc::clone(&cache);
                            thread::spawn(move || {
                                for i in 0..200 {
                                    let key = format!("{}-{}", t, i % 50);
                                    if cache.get(&key).is_none() {
                                        cache.add(&key, ByteView::from(key.as_str()));
                                    }
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    black_box(cache.len())
                });
            },
        );
    }

    group.finish();
}

fn bench_hash_ring_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_ring_get");

    for replicas in [10, 50, 200].iter() {
        let mut ring = HashRing::new(*replicas);
        ring.add((0..16).map(|n| format!("node-{}", n)));

        group.bench_with_input(BenchmarkId::new("replicas", replicas), &ring, |b, ring| {
            let mut i = 0u64;
            b.iter(|| {
                i += 1;
                black_box(ring.get(&format!("user:{}", i)).map(str::len))
            });
        });
    }

    group.finish();
}

fn bench_group_get(c: &mut Criterion) {
    let group = Group::new(
        "bench",
        0,
        loader_fn(|key: &str| Ok(key.as_bytes().to_vec())),
    );
    for i in 0..100 {
        let _ = group.get(&format!("warm{}", i));
    }

    c.bench_function("group_get_hit", |b| {
        let mut i = 0;
        b.iter(|| {
            i += 1;
            black_box(group.get(&format!("warm{}", i % 100)).is_ok())
        });
    });
}

criterion_group!(
    benches,
    bench_lru_add,
    bench_lru_get_hit,
    bench_concurrent_cache,
    bench_hash_ring_get,
    bench_group_get
);
criterion_main!(benches);
