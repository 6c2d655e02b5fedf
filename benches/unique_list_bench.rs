use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use unique_collections::{factory, HashedUniqueList, UniqueList};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_push(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(2_000).map(key).collect();
    c.bench_function("unique_list_linear_push_2k", |b| {
        b.iter_batched(
            UniqueList::<String>::new,
            |mut l| {
                for k in &keys {
                    l.push(k.clone());
                }
                black_box(l)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("unique_list_hashed_push_2k", |b| {
        b.iter_batched(
            HashedUniqueList::<String>::hashed,
            |mut l| {
                for k in &keys {
                    l.push(k.clone());
                }
                black_box(l)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_contains(c: &mut Criterion) {
    let keys: Vec<_> = lcg(7).take(5_000).map(key).collect();
    let linear = factory::linear_from(keys.clone());
    let hashed = factory::hashed_from(keys.clone());
    c.bench_function("unique_list_linear_contains_hit", |b| {
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(linear.contains(k));
        })
    });
    c.bench_function("unique_list_hashed_contains_hit", |b| {
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(hashed.contains(k));
        })
    });
}

fn bench_seed_with_duplicates(c: &mut Criterion) {
    // Every key appears twice.
    let input: Vec<_> = lcg(11)
        .take(5_000)
        .map(key)
        .flat_map(|k| [k.clone(), k])
        .collect();
    c.bench_function("unique_list_hashed_seed_10k_half_dupes", |b| {
        b.iter_batched(
            || input.clone(),
            |items| black_box(factory::hashed_from(items)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_retain_all(c: &mut Criterion) {
    let keys: Vec<_> = lcg(13).take(5_000).map(key).collect();
    let keep: Vec<_> = keys.iter().step_by(3).cloned().collect();
    let base = factory::hashed_from(keys);
    c.bench_function("unique_list_hashed_retain_all_third", |b| {
        b.iter_batched(
            || base.clone(),
            |mut l| {
                l.retain_all(&keep);
                black_box(l)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_push, bench_contains, bench_seed_with_duplicates, bench_retain_all
}
criterion_main!(benches);
