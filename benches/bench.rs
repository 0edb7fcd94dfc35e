use criterion::*;
use rand::prelude::*;
use skipset::{Options, SkipSet};
use std::collections::BTreeSet;

const N: usize = 10_000;

fn random_keys(n: usize) -> Vec<u64> {
  let mut rng = SmallRng::seed_from_u64(42);
  (0..n).map(|_| rng.random()).collect()
}

fn bench_insert(c: &mut Criterion) {
  let keys = random_keys(N);
  let mut group = c.benchmark_group("insert");

  group.bench_function("skipset", |b| {
    b.iter_batched(
      || SkipSet::with_options(Options::new().with_seed(7)),
      |mut set| {
        for k in &keys {
          set.insert(*k);
        }
        set
      },
      BatchSize::SmallInput,
    )
  });

  group.bench_function("btreeset", |b| {
    b.iter_batched(
      BTreeSet::new,
      |mut set| {
        for k in &keys {
          set.insert(*k);
        }
        set
      },
      BatchSize::SmallInput,
    )
  });

  group.finish();
}

fn bench_lookup(c: &mut Criterion) {
  let keys = random_keys(N);
  let set: SkipSet<u64> = keys.iter().copied().collect();
  let tree: BTreeSet<u64> = keys.iter().copied().collect();
  let mut group = c.benchmark_group("lookup");

  group.bench_function("skipset", |b| {
    let mut i = 0;
    b.iter(|| {
      i = (i + 1) % keys.len();
      black_box(set.contains(&keys[i]))
    })
  });

  group.bench_function("btreeset", |b| {
    let mut i = 0;
    b.iter(|| {
      i = (i + 1) % keys.len();
      black_box(tree.contains(&keys[i]))
    })
  });

  group.finish();
}

fn bench_lower_bound(c: &mut Criterion) {
  let keys = random_keys(N);
  let set: SkipSet<u64> = keys.iter().copied().collect();
  let mut rng = SmallRng::seed_from_u64(9);

  c.bench_function("skipset_lower_bound", |b| {
    b.iter_batched(
      || rng.random::<u64>(),
      |k| black_box(set.lower_bound(&k).get().copied()),
      BatchSize::SmallInput,
    )
  });
}

fn bench_erase_insert_churn(c: &mut Criterion) {
  let keys = random_keys(N);
  let mut set: SkipSet<u64> = keys.iter().copied().collect();
  let mut i = 0;

  c.bench_function("skipset_churn", |b| {
    b.iter(|| {
      i = (i + 1) % keys.len();
      set.erase(&keys[i]);
      set.insert(keys[i]);
    })
  });
}

criterion_group!(
  benches,
  bench_insert,
  bench_lookup,
  bench_lower_bound,
  bench_erase_insert_churn
);
criterion_main!(benches);
