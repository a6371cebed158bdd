//! Benchmark for hasher backend performance.

use anyhow::Result;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::hasher::HasherType;
use crate::keyspace::{Alphabet, Keyspace, DEFAULT_ALPHABET};
use crate::report::format_rate;

/// Run standardized benchmark for a hasher backend.
pub fn run_benchmark(hasher_type: HasherType, json: bool) -> Result<()> {
    if !json {
        println!("Running Benchmark for {}...", hasher_type.name());
        println!("Time: 2s warmup + 5s measure (approx)");
    }

    let inputs = candidate_inputs(1000)?;

    // Warmup phase
    let mut warm_hasher = hasher_type.create();
    let warmup = Instant::now();
    while warmup.elapsed().as_secs() < 2 {
        for input in &inputs {
            warm_hasher.hash(input.as_bytes());
        }
    }

    // Measurement phase
    let start = Instant::now();
    let counter = AtomicU64::new(0);

    let pool = rayon::ThreadPoolBuilder::new().build()?;

    pool.install(|| {
        let start_inner = Instant::now();

        (0..500_000).into_par_iter().for_each_init(
            || hasher_type.create(),
            |hasher, _| {
                if start_inner.elapsed().as_secs() >= 5 {
                    return;
                }

                for input in &inputs {
                    hasher.hash(input.as_bytes());
                }
                counter.fetch_add(inputs.len() as u64, Ordering::Relaxed);
            },
        );
    });

    let count = counter.load(Ordering::Relaxed);
    let duration = start.elapsed().as_secs_f64();
    let speed = count as f64 / duration;

    if json {
        println!(
            "{{ \"name\": \"{}\", \"hashes_per_sec\": {}, \"total_hashes\": {}, \"duration_secs\": {} }}",
            hasher_type.name(),
            speed as u64,
            count,
            duration
        );
    } else {
        println!("------------------------------------------------");
        println!("Result: {}", format_rate(speed));
        println!("Total:  {} hashes in {:.2}s", count, duration);
        println!("------------------------------------------------");
    }

    Ok(())
}

/// Deterministic spread of candidate strings across the default keyspace,
/// so the benchmark hashes the same length mix a real search would.
fn candidate_inputs(count: u64) -> Result<Vec<String>> {
    let keyspace = Keyspace::new(Alphabet::new(DEFAULT_ALPHABET)?, 1, 8)?;
    let step = keyspace.total() / count;
    Ok((0..count).map(|i| keyspace.string_at(i * step)).collect())
}
