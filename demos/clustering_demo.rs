use clap::Parser;
use clump_hash::HashTable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::Distribution;
use rand_distr::Zipf;

/// Inserts a configurable key workload and prints how the clustering-driven
/// resize policy reacts: a chain snapshot at every growth step plus the
/// final chain histogram.
#[derive(Parser, Debug)]
struct Args {
    /// Number of keys to insert.
    #[arg(short = 'n', long = "keys", default_value_t = 10_000)]
    keys: usize,

    /// Draw keys from a Zipf distribution with this exponent instead of
    /// uniformly. Skewed workloads repeat hot keys, so the table sees
    /// replacements and stays smaller than the insert count.
    #[arg(short = 's', long = "skew")]
    skew: Option<f32>,

    /// Collisions tolerated between resize checks.
    #[arg(long = "collisions", default_value_t = 10)]
    collisions: u32,

    /// Clustering score above which a resize check grows the table.
    #[arg(long = "clustering", default_value_t = 2.0)]
    clustering: f64,

    /// Seed for the key stream.
    #[arg(long = "seed", default_value_t = 0xC1)]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    let mut table: HashTable<u64, u64> = HashTable::new();
    table.max_allowed_collisions = args.collisions;
    table.max_allowed_clustering = args.clustering;

    println!(
        "Inserting {} keys ({}), collision budget {}, clustering limit {:.2}",
        args.keys,
        match args.skew {
            Some(exponent) => format!("Zipf, exponent {exponent}"),
            None => "uniform".to_string(),
        },
        table.max_allowed_collisions,
        table.max_allowed_clustering,
    );
    println!("Starting capacity: {}", table.capacity());

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let zipf = args
        .skew
        .map(|exponent| Zipf::new(args.keys as f32, exponent).unwrap());

    let mut last_capacity = table.capacity();
    for _ in 0..args.keys {
        let key = match &zipf {
            Some(zipf) => zipf.sample(&mut rng) as u64,
            None => rng.random(),
        };
        table.insert(key, key);

        if table.capacity() != last_capacity {
            println!(
                "\nGrew {last_capacity} -> {} buckets at {} entries",
                table.capacity(),
                table.len()
            );
            table.chain_stats().print();
            last_capacity = table.capacity();
        }
    }

    println!("\nFinal state after {} insertions:", args.keys);
    table.chain_stats().print();
    println!(
        "Load factor: {:.2}%",
        table.len() as f64 / table.capacity() as f64 * 100.0
    );
}
