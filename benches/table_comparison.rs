use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;
use core::hint::black_box;
use std::collections::HashMap as StdHashMap;

use clump_hash::HashTable;
use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;

trait BenchKey: Clone + Eq + Hash {
    fn new(seed: u64) -> Self;
}

impl BenchKey for u64 {
    fn new(seed: u64) -> Self {
        black_box(seed)
    }
}

impl BenchKey for String {
    fn new(seed: u64) -> Self {
        black_box(format!("key_{seed:016X}"))
    }
}

/// All three tables hash through SipHasher so the comparison isolates
/// layout and resize policy rather than hash quality.
#[derive(Clone, Default)]
struct BuildSip;

impl BuildHasher for BuildSip {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> SipHasher {
        SipHasher::new()
    }
}

/// Collapses eight consecutive integer keys onto one hash value, so every
/// table has to cope with heavy chaining no matter how it spreads buckets.
#[derive(Clone, Default)]
struct BuildCoarse;

#[derive(Default)]
struct CoarseHasher {
    state: u64,
}

impl Hasher for CoarseHasher {
    fn finish(&self) -> u64 {
        self.state >> 3
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = (self.state << 8) | u64::from(byte);
        }
    }

    fn write_u64(&mut self, value: u64) {
        self.state = value;
    }
}

impl BuildHasher for BuildCoarse {
    type Hasher = CoarseHasher;

    fn build_hasher(&self) -> CoarseHasher {
        CoarseHasher::default()
    }
}

const SIZES: &[usize] = &[1 << 8, 1 << 10, 1 << 12, 1 << 14, 1 << 16];

fn keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            // Keep bit 63 clear; the miss benchmarks claim that half of
            // the seed space for themselves.
            let seed = rng.try_next_u64().unwrap() >> 1;
            K::new(seed)
        })
        .collect()
}

fn miss_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let seed = rng.try_next_u64().unwrap() | (1 << 63);
            K::new(seed)
        })
        .collect()
}

fn shuffled<K: Clone>(keys: &[K]) -> Vec<K> {
    let mut keys = keys.to_vec();
    keys.shuffle(&mut SmallRng::from_os_rng());
    keys
}

fn filled_table<K: BenchKey>(keys: &[K]) -> HashTable<K, usize, BuildSip> {
    let mut table = HashTable::with_hasher(BuildSip);
    for (value, key) in keys.iter().cloned().enumerate() {
        table.insert(key, value);
    }
    table
}

fn bench_insert<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = HashTable::with_hasher(BuildSip);
                    for (value, key) in keys.into_iter().enumerate() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = StdHashMap::with_hasher(BuildSip);
                    for (value, key) in keys.into_iter().enumerate() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = HashbrownHashMap::with_hasher(BuildSip);
                    for (value, key) in keys.into_iter().enumerate() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_insert_preallocated<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_preallocated_{}",
        core::any::type_name::<K>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = HashTable::with_capacity_and_hasher(size, BuildSip);
                    for (value, key) in keys.into_iter().enumerate() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = StdHashMap::with_capacity_and_hasher(size, BuildSip);
                    for (value, key) in keys.into_iter().enumerate() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = HashbrownHashMap::with_capacity_and_hasher(size, BuildSip);
                    for (value, key) in keys.into_iter().enumerate() {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_lookup_hit<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("lookup_hit_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let table = filled_table(&keys);
        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |probes| {
                    for key in &probes {
                        black_box(table.try_get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        let table: StdHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |probes| {
                    for key in &probes {
                        black_box(table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        let table: HashbrownHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |probes| {
                    for key in &probes {
                        black_box(table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_lookup_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("lookup_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = keys::<K>(size);
        let misses = miss_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let table = filled_table(&keys);
        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&misses),
                |probes| {
                    for key in &probes {
                        black_box(table.try_get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        let table: StdHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&misses),
                |probes| {
                    for key in &probes {
                        black_box(table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });

        let table: HashbrownHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&misses),
                |probes| {
                    for key in &probes {
                        black_box(table.get(key));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let table = filled_table(&keys);
        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter_batched(
                || (table.clone(), shuffled(&keys)),
                |(mut table, keys)| {
                    for key in &keys {
                        black_box(table.remove(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        let table: StdHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter_batched(
                || (table.clone(), shuffled(&keys)),
                |(mut table, keys)| {
                    for key in &keys {
                        black_box(table.remove(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        let table: HashbrownHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || (table.clone(), shuffled(&keys)),
                |(mut table, keys)| {
                    for key in &keys {
                        black_box(table.remove(key));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_iterate<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iterate_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let table = filled_table(&keys);
        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter(|| {
                for entry in &table {
                    black_box(entry);
                }
            })
        });

        let table: StdHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter(|| {
                for entry in &table {
                    black_box(entry);
                }
            })
        });

        let table: HashbrownHashMap<K, usize, BuildSip> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(value, key)| (key, value))
            .collect();
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for entry in &table {
                    black_box(entry);
                }
            })
        });
    }
}

/// Mixed insert/lookup/remove stream with Zipf-distributed keys. Skewed
/// keys keep a handful of buckets hot, which is exactly the shape the
/// clustering score is supposed to notice.
fn bench_zipf_churn<const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group("zipf_churn");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let mut rng = SmallRng::from_os_rng();
        let key_distr = Zipf::new(size as f32, 1.1).unwrap();
        let ops: Vec<(u8, u64)> = (0..size * 2)
            .map(|_| {
                let op = rng.random_range(0u8..4);
                let key = key_distr.sample(&mut rng) as u64;
                (op, key)
            })
            .collect();
        group.throughput(Throughput::Elements(ops.len() as u64));

        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter_batched(
                || ops.clone(),
                |ops| {
                    let mut table = HashTable::with_hasher(BuildSip);
                    for (op, key) in ops {
                        match op {
                            // Inserts twice as often as each other op, so
                            // the table keeps growing under churn.
                            0 | 1 => {
                                black_box(table.insert(key, key));
                            }
                            2 => {
                                black_box(table.try_get(&key));
                            }
                            _ => {
                                black_box(table.remove(&key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter_batched(
                || ops.clone(),
                |ops| {
                    let mut table = StdHashMap::with_hasher(BuildSip);
                    for (op, key) in ops {
                        match op {
                            0 | 1 => {
                                black_box(table.insert(key, key));
                            }
                            2 => {
                                black_box(table.get(&key));
                            }
                            _ => {
                                black_box(table.remove(&key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || ops.clone(),
                |ops| {
                    let mut table = HashbrownHashMap::with_hasher(BuildSip);
                    for (op, key) in ops {
                        match op {
                            0 | 1 => {
                                black_box(table.insert(key, key));
                            }
                            2 => {
                                black_box(table.get(&key));
                            }
                            _ => {
                                black_box(table.remove(&key));
                            }
                        }
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

/// Inserts through a deliberately coarse hasher that lands eight keys on
/// every hash value. The interesting number is how much the clustering
/// policy spends on growth when spreading out is impossible; the eager
/// variant tightens both knobs to their most trigger-happy settings.
fn bench_clustering_pressure<const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group("clustering_pressure");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys: Vec<u64> = (0..size as u64).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("clump_hash/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = HashTable::with_hasher(BuildCoarse);
                    for key in keys {
                        black_box(table.insert(key, ()));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("clump_hash_eager/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = HashTable::with_hasher(BuildCoarse);
                    table.max_allowed_collisions = 1;
                    table.max_allowed_clustering = 0.5;
                    for key in keys {
                        black_box(table.insert(key, ()));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std_hash_map/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = StdHashMap::with_hasher(BuildCoarse);
                    for key in keys {
                        black_box(table.insert(key, ()));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || shuffled(&keys),
                |keys| {
                    let mut table = HashbrownHashMap::with_hasher(BuildCoarse);
                    for key in keys {
                        black_box(table.insert(key, ()));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(
    benches,
    bench_insert::<u64, 4>,
    bench_insert::<String, 3>,
    bench_insert_preallocated::<u64, 4>,
    bench_insert_preallocated::<String, 3>,
    bench_lookup_hit::<u64, 4>,
    bench_lookup_hit::<String, 3>,
    bench_lookup_miss::<u64, 4>,
    bench_lookup_miss::<String, 3>,
    bench_remove::<u64, 4>,
    bench_remove::<String, 3>,
    bench_iterate::<u64, 4>,
    bench_iterate::<String, 3>,
    bench_zipf_churn::<3>,
    bench_clustering_pressure::<2>,
);

criterion_main!(benches);
