//! Exhaustive-search coordinator.
//!
//! The ordinal space is split once into contiguous per-worker ranges; each
//! worker scans its range in increasing order with a private hasher and
//! polls a shared flag so a match anywhere stops everyone within one
//! iteration. Workers hand their results back through the parallel iterator;
//! only the caller ever touches the console.

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::hasher::{Digest, HasherType};
use crate::keyspace::Keyspace;

/// Candidates scanned between flushes of the shared progress counter.
const PROGRESS_INTERVAL: u64 = 4096;

/// Shared observable search state: a monotonic tested counter and the
/// write-once found flag that doubles as the cancellation token. Readers may
/// see slightly stale values; writers never block.
#[derive(Default)]
pub struct SearchProgress {
    tested: AtomicU64,
    found: AtomicBool,
}

impl SearchProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Candidates tested so far, lagging by at most one flush interval per
    /// worker.
    pub fn tested(&self) -> u64 {
        self.tested.load(Ordering::Relaxed)
    }

    /// Whether some worker has claimed a match.
    pub fn match_found(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    fn add(&self, n: u64) {
        if n > 0 {
            self.tested.fetch_add(n, Ordering::Relaxed);
        }
    }

    /// Claim the found state. The first caller wins; everyone else sees
    /// `false` and stops scanning.
    fn claim(&self) -> bool {
        self.found
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Recovered plaintext and its digest rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    pub plaintext: String,
    pub digest_hex: String,
}

/// Terminal state of one search run.
#[derive(Debug)]
pub struct SearchOutcome {
    /// The match, or `None` when every range was exhausted.
    pub result: Option<Match>,
    /// Exact number of candidates hashed across all workers.
    pub tested: u64,
}

/// Per-range scan result returned by one worker.
struct RangeScan {
    tested: u64,
    found: Option<Match>,
}

/// Immutable configuration for one search invocation.
pub struct SearchConfig {
    /// Target digest, already decoded from hex.
    pub target: Digest,
    pub keyspace: Keyspace,
    pub hasher: HasherType,
    pub workers: usize,
}

/// Decode a 64-character hex digest into target bytes.
pub fn parse_target(s: &str) -> Result<Digest> {
    if s.len() != 64 {
        bail!(
            "target digest must be 64 hex characters, got {}",
            s.len()
        );
    }
    let bytes = hex::decode(s).context("target digest is not valid hexadecimal")?;
    let mut target = [0u8; 32];
    target.copy_from_slice(&bytes);
    Ok(target)
}

pub struct Search {
    config: SearchConfig,
}

impl Search {
    /// Validate the configuration. Every configuration error surfaces here,
    /// before any worker exists.
    pub fn new(config: SearchConfig) -> Result<Self> {
        if config.workers == 0 {
            bail!("worker count must be at least 1");
        }
        Ok(Self { config })
    }

    pub fn total(&self) -> u64 {
        self.config.keyspace.total()
    }

    /// Number of workers that will actually run: never more than there are
    /// candidates, so every range is non-empty.
    pub fn effective_workers(&self) -> usize {
        (self.config.workers as u64).min(self.total()) as usize
    }

    /// Run the search to match or exhaustion and return once all workers
    /// have joined.
    pub fn run(&self, progress: &SearchProgress) -> Result<SearchOutcome> {
        let workers = self.effective_workers();
        let ranges = partition(self.total(), workers as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let scans: Vec<RangeScan> = pool.install(|| {
            ranges
                .into_par_iter()
                .map(|range| self.scan_range(range, progress))
                .collect()
        });

        let tested = scans.iter().map(|scan| scan.tested).sum();
        let result = scans.into_iter().find_map(|scan| scan.found);
        Ok(SearchOutcome { result, tested })
    }

    fn scan_range(&self, range: Range<u64>, progress: &SearchProgress) -> RangeScan {
        let keyspace = &self.config.keyspace;
        let mut hasher = self.config.hasher.create();

        let mut tested: u64 = 0;
        let mut pending: u64 = 0;
        let mut found = None;

        for ordinal in range {
            if progress.match_found() {
                break;
            }

            let candidate = keyspace.string_at(ordinal);
            let digest = hasher.hash(candidate.as_bytes());
            tested += 1;
            pending += 1;

            if digest == self.config.target {
                if progress.claim() {
                    found = Some(Match {
                        digest_hex: hex::encode(digest),
                        plaintext: candidate,
                    });
                }
                break;
            }

            if pending >= PROGRESS_INTERVAL {
                progress.add(pending);
                pending = 0;
            }
        }

        progress.add(pending);
        RangeScan { tested, found }
    }
}

/// Split `[0, total)` into `workers` contiguous ranges of near-equal size;
/// the last range absorbs the division remainder.
fn partition(total: u64, workers: u64) -> Vec<Range<u64>> {
    let chunk = total / workers;
    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i == workers - 1 {
                total
            } else {
                start + chunk
            };
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyspace::Alphabet;
    use crate::sha256::Sha256;

    fn keyspace(alphabet: &str, min: u32, max: u32) -> Keyspace {
        Keyspace::new(Alphabet::new(alphabet).unwrap(), min, max).unwrap()
    }

    fn search_for(target: Digest, ks: Keyspace, workers: usize) -> Search {
        Search::new(SearchConfig {
            target,
            keyspace: ks,
            hasher: HasherType::Scratch,
            workers,
        })
        .unwrap()
    }

    #[test]
    fn test_parse_target() {
        let hex64 = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
        let target = parse_target(hex64).unwrap();
        assert_eq!(hex::encode(target), hex64);

        assert!(parse_target("abc").is_err());
        assert!(parse_target(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn test_partition_covers_space_exactly() {
        for total in [1u64, 2, 7, 100, 509] {
            for workers in 1..=total {
                let ranges = partition(total, workers);
                assert_eq!(ranges.len() as u64, workers);
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges.last().unwrap().end, total);
                for pair in ranges.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start, "gap or overlap");
                    assert!(!pair[0].is_empty());
                }
                assert!(!ranges.last().unwrap().is_empty());
            }
        }
    }

    #[test]
    fn test_rejects_zero_workers() {
        let config = SearchConfig {
            target: [0u8; 32],
            keyspace: keyspace("ab", 1, 2),
            hasher: HasherType::Scratch,
            workers: 0,
        };
        assert!(Search::new(config).is_err());
    }

    #[test]
    fn test_workers_clamped_to_total() {
        let search = search_for([0u8; 32], keyspace("ab", 1, 1), 16);
        assert_eq!(search.effective_workers(), 2);
    }

    #[test]
    fn test_finds_match_any_worker_count() {
        let target = Sha256::digest(b"aab");
        for workers in [1usize, 2, 4] {
            let search = search_for(target, keyspace("ab", 1, 3), workers);
            let progress = SearchProgress::new();
            let outcome = search.run(&progress).unwrap();
            let found = outcome.result.expect("match must be found");
            assert_eq!(found.plaintext, "aab");
            assert_eq!(found.digest_hex, hex::encode(target));
            assert!(progress.match_found());
        }
    }

    #[test]
    fn test_backends_find_the_same_match() {
        let target = Sha256::digest(b"ba");
        for hasher in [HasherType::Scratch, HasherType::Oneshot, HasherType::Library] {
            let search = Search::new(SearchConfig {
                target,
                keyspace: keyspace("ab", 1, 2),
                hasher,
                workers: 2,
            })
            .unwrap();
            let outcome = search.run(&SearchProgress::new()).unwrap();
            assert_eq!(outcome.result.unwrap().plaintext, "ba");
        }
    }

    #[test]
    fn test_exhaustion_scans_every_candidate() {
        // Target digest of a string outside the space: no candidate matches.
        let target = Sha256::digest(b"not in the keyspace");
        let ks = keyspace("ab", 1, 3);
        let total = ks.total();
        for workers in [1usize, 3, 4] {
            let search = search_for(target, ks.clone(), workers);
            let progress = SearchProgress::new();
            let outcome = search.run(&progress).unwrap();
            assert!(outcome.result.is_none());
            assert_eq!(outcome.tested, total);
            assert_eq!(progress.tested(), total);
            assert!(!progress.match_found());
        }
    }

    #[test]
    fn test_single_worker_stops_at_match_ordinal() {
        let ks = keyspace("ab", 1, 3);
        let needle = "bab";
        let ordinal = ks.ordinal_of(needle).unwrap();
        let search = search_for(Sha256::digest(needle.as_bytes()), ks, 1);
        let outcome = search.run(&SearchProgress::new()).unwrap();
        assert_eq!(outcome.result.unwrap().plaintext, needle);
        assert_eq!(outcome.tested, ordinal + 1);
    }

    #[test]
    fn test_cancelled_token_stops_workers_before_scanning() {
        let progress = SearchProgress::new();
        assert!(progress.claim());

        let search = search_for(Sha256::digest(b"aab"), keyspace("ab", 1, 3), 4);
        let outcome = search.run(&progress).unwrap();
        assert!(outcome.result.is_none());
        assert_eq!(outcome.tested, 0);
    }

    #[test]
    fn test_claim_is_first_wins() {
        let progress = SearchProgress::new();
        assert!(!progress.match_found());
        assert!(progress.claim());
        assert!(!progress.claim());
        assert!(progress.match_found());
    }
}
