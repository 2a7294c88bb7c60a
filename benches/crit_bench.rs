use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

criterion_group!(benches, bench_get, bench_insert, bench_ref_iter);
criterion_main!(benches);

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("Get");
    for n in [50, 100, 200, 500, 1000].iter() {
        let n = *n;
        let mut bp_map = bptree::OrderedMap::new(64).unwrap();
        for i in 0..n {
            bp_map.insert(i, i);
        }

        let mut std_map = std::collections::BTreeMap::new();
        for i in 0..n {
            std_map.insert(i, i);
        }

        group.bench_function(BenchmarkId::new("Bp", n), |b| {
            b.iter(|| {
                for i in 0..n {
                    assert!(bp_map.get(&i).unwrap() == &i);
                }
            })
        });
        group.bench_function(BenchmarkId::new("Std", n), |b| {
            b.iter(|| {
                for i in 0..n {
                    assert!(std_map.get(&i).unwrap() == &i);
                }
            })
        });
    }
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert");
    for n in [1000, 10000].iter() {
        let n = *n;
        group.bench_function(BenchmarkId::new("Bp", n), |b| {
            b.iter(|| {
                let mut m = bptree::OrderedMap::new(64).unwrap();
                for i in 0..n {
                    m.insert(i, i);
                }
                m
            })
        });
        group.bench_function(BenchmarkId::new("Std", n), |b| {
            b.iter(|| {
                let mut m = std::collections::BTreeMap::new();
                for i in 0..n {
                    m.insert(i, i);
                }
                m
            })
        });
    }
    group.finish();
}

fn bench_ref_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("RefIter");
    for n in [100, 1000, 10000, 100000].iter() {
        let mut bp_map = bptree::OrderedMap::new(64).unwrap();
        for i in 0..*n {
            bp_map.insert(i, i);
        }

        let mut std_map = std::collections::BTreeMap::new();
        for i in 0..*n {
            std_map.insert(i, i);
        }

        group.bench_function(BenchmarkId::new("Bp", n), |b| {
            b.iter(|| {
                for (k, v) in bp_map.iter() {
                    assert!(k == v);
                }
            })
        });
        group.bench_function(BenchmarkId::new("Std", n), |b| {
            b.iter(|| {
                for (k, v) in std_map.iter() {
                    assert!(k == v);
                }
            })
        });
    }
    group.finish();
}

use mimalloc::MiMalloc;
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
