//! Anagram combination search
//!
//! Candidate words are encoded as letter multisets, combined by a
//! branch-and-bound traversal, and every combination matching the target
//! phrase is verified against the control digests.

pub mod candidate;
pub mod config;
pub mod engine;
pub mod parallel;
pub mod result;

pub use candidate::{Candidate, build_candidates};
pub use config::{Encoding, SearchConfig};
pub use parallel::{ParallelConfig, ParallelResult, run_parallel_search};

use crate::error::SolveError;
use crate::fingerprint::{Fingerprint, LetterCounts, LetterMultiset};
use crate::verify::ControlDigests;
use log::info;

/// Encode the target phrase and candidate words, then run the search.
///
/// Encoding failures abort before any worker starts.
pub fn solve<S: AsRef<str>>(
    words: &[S],
    phrase: &str,
    digests: ControlDigests,
    search_config: &SearchConfig,
    parallel_config: &ParallelConfig,
) -> Result<ParallelResult, SolveError> {
    match search_config.encoding {
        Encoding::Primes => {
            solve_with::<Fingerprint, S>(words, phrase, digests, search_config, parallel_config)
        }
        Encoding::Counts => {
            solve_with::<LetterCounts, S>(words, phrase, digests, search_config, parallel_config)
        }
    }
}

fn solve_with<K: LetterMultiset, S: AsRef<str>>(
    words: &[S],
    phrase: &str,
    digests: ControlDigests,
    search_config: &SearchConfig,
    parallel_config: &ParallelConfig,
) -> Result<ParallelResult, SolveError> {
    let target = K::encode(phrase)?;
    let candidates: Vec<Candidate<K>> = build_candidates(words)?;
    info!(
        "searching {} candidates for {}-word anagrams of {:?} ({} encoding)",
        candidates.len(),
        search_config.max_len,
        phrase,
        K::NAME
    );
    Ok(run_parallel_search(
        candidates,
        target,
        digests,
        search_config,
        parallel_config,
    )?)
}
