//! unhash - Research tool for recovering SHA-256 preimages by exhaustive search.
//!
//! Partitions a bounded keyspace across CPU workers and scans for a plaintext
//! whose digest equals the target.

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use unhash::hasher::HasherType;
use unhash::keyspace::{Alphabet, Keyspace, DEFAULT_ALPHABET};
use unhash::report::{format_elapsed, format_rate};
use unhash::search::{parse_target, Search, SearchConfig, SearchProgress};

fn parse_hasher_type(s: &str) -> Result<HasherType, String> {
    HasherType::from_str(s)
}

#[derive(Parser)]
#[command(name = "unhash")]
#[command(about = "Research tool for recovering SHA-256 preimages by exhaustive keyspace search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Brute-force a target digest over a keyspace
    Crack {
        /// Target SHA-256 digest (64 hex characters)
        hash: String,

        /// Ordered candidate alphabet
        #[arg(long, default_value = DEFAULT_ALPHABET)]
        alphabet: String,

        /// Minimum candidate length
        #[arg(long, default_value_t = 1)]
        min_length: u32,

        /// Maximum candidate length
        #[arg(long, default_value_t = 4)]
        max_length: u32,

        /// Worker threads (default: available cores minus one)
        #[arg(long)]
        threads: Option<usize>,

        /// Hasher backend (scratch, oneshot, sha2)
        #[arg(long, value_parser = parse_hasher_type, default_value = "sha2")]
        hasher: HasherType,

        /// Render a progress bar (costs a little throughput)
        #[arg(long)]
        progress: bool,
    },

    /// Compute the digest of a single plaintext
    Digest {
        /// The plaintext
        plaintext: String,

        /// Hasher backend (scratch, oneshot, sha2)
        #[arg(long, value_parser = parse_hasher_type, default_value = "scratch")]
        hasher: HasherType,
    },

    /// Run benchmark
    Bench {
        /// Hasher backend to benchmark (scratch, oneshot, sha2)
        #[arg(long, value_parser = parse_hasher_type, default_value = "scratch")]
        hasher: HasherType,

        /// Output JSON for benchmark runner
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Crack {
            hash,
            alphabet,
            min_length,
            max_length,
            threads,
            hasher,
            progress,
        } => run_crack(
            &hash, &alphabet, min_length, max_length, threads, hasher, progress,
        ),

        Command::Digest { plaintext, hasher } => run_digest(&plaintext, hasher),

        Command::Bench { hasher, json } => unhash::benchmark::run_benchmark(hasher, json),
    }
}

fn run_crack(
    hash: &str,
    alphabet: &str,
    min_length: u32,
    max_length: u32,
    threads: Option<usize>,
    hasher: HasherType,
    show_progress: bool,
) -> Result<()> {
    let target = parse_target(&hash.to_lowercase())?;
    let keyspace = Keyspace::new(Alphabet::new(alphabet)?, min_length, max_length)?;

    let available = thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
    // Leave one core for the host unless the user asked for a count.
    let workers = threads.unwrap_or_else(|| available.saturating_sub(1).max(1));

    let search = Search::new(SearchConfig {
        target,
        keyspace: keyspace.clone(),
        hasher,
        workers,
    })?;
    let total = search.total();

    println!("\nAttempting to reverse SHA-256 digest [{}]\n", hash);
    println!("Key space:\t\t[{}]", keyspace.alphabet());
    println!("Min length:\t\t[{}]", min_length);
    println!("Max length:\t\t[{}]", max_length);
    println!("Possibilities:\t\t[{}]", total);
    println!("Hasher:\t\t\t[{}]", hasher.name());
    println!("Threads available:\t[{}]", available);
    println!("Threads utilising:\t[{}]", search.effective_workers());
    println!(
        "Worker chunk size:\t[{}]",
        total / search.effective_workers() as u64
    );

    let progress = Arc::new(SearchProgress::new());
    let done = Arc::new(AtomicBool::new(false));
    let reporter = if show_progress {
        println!();
        Some(spawn_reporter(total, Arc::clone(&progress), Arc::clone(&done)))
    } else {
        None
    };

    let started = Instant::now();
    let outcome = search.run(&progress);
    let elapsed = started.elapsed();

    done.store(true, Ordering::Release);
    if let Some(handle) = reporter {
        let _ = handle.join();
    }
    let outcome = outcome?;

    match &outcome.result {
        Some(found) => {
            println!("\nMatch found!");
            println!("Hash:      [{}]", found.digest_hex);
            println!("Plaintext: [{}]\n", found.plaintext);
        }
        None => println!("\nNo matches found!\n"),
    }

    let elapsed_secs = elapsed.as_secs_f64();
    let average = if elapsed_secs > 0.0 {
        outcome.tested as f64 / elapsed_secs
    } else {
        0.0
    };
    println!("Candidates tested:\t[{}]", outcome.tested);
    println!("Total Time Elapsed:\t[{}]", format_elapsed(elapsed));
    println!("Average Hashes/sec:\t[{}]\n", format_rate(average));

    Ok(())
}

/// Sampling renderer: reads the shared counters on a short cadence and never
/// touches worker state.
fn spawn_reporter(
    total: u64,
    progress: Arc<SearchProgress>,
    done: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let pb = ProgressBar::new(total);
        pb.set_style(unhash::default_progress_style());

        while !done.load(Ordering::Acquire) {
            pb.set_position(progress.tested().min(total));
            thread::sleep(Duration::from_millis(50));
        }

        pb.set_position(progress.tested().min(total));
        pb.finish_and_clear();
    })
}

fn run_digest(plaintext: &str, hasher_type: HasherType) -> Result<()> {
    let mut hasher = hasher_type.create();
    let digest = hasher.hash(plaintext.as_bytes());

    println!("Plaintext: \"{}\"", plaintext);
    println!("Hasher: {}", hasher.name());
    println!("SHA-256: {}", hex::encode(digest));

    Ok(())
}
