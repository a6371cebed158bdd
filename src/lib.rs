//! Unhash - Research tool for recovering SHA-256 preimages by exhaustive search.
//!
//! This tool implements SHA-256 from scratch, checks it against library
//! implementations, and brute-forces a bounded keyspace of candidate strings
//! across CPU workers looking for a plaintext with a given digest.

pub mod benchmark;
pub mod hasher;
pub mod keyspace;
pub mod report;
pub mod search;
pub mod sha256;

/// Default progress bar style for CLI operations.
pub fn default_progress_style() -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
        .unwrap()
        .progress_chars("#>-")
}
