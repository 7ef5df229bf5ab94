//! Branch-and-bound search over word combinations
//!
//! The search walks the classic include/exclude tree over the candidate
//! index: at every index the candidate is either added to the partial
//! combination or skipped. Adding a candidate whose key no longer fits within
//! the target cuts the whole include subtree. Once a combination holds
//! `max_len` words it is emitted if its key equals the target, and discarded
//! otherwise.
//!
//! The tree is walked with an explicit stack rather than recursion, since its
//! depth grows with the number of candidates. Work partitions by the index of
//! the first chosen word, so independent workers can split the space without
//! sharing any mutable state.

use crate::fingerprint::LetterMultiset;
use crate::search::candidate::{Candidate, Combination};
use log::trace;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// How often (in expanded frames) the deadline is checked
const DEADLINE_CHECK_INTERVAL: u64 = 4096;

/// Receiver of complete combinations
pub trait CombinationSink {
    /// Accept a combination. Returning false stops the search.
    fn emit(&mut self, combination: Combination) -> bool;
}

impl CombinationSink for Vec<Combination> {
    fn emit(&mut self, combination: Combination) -> bool {
        self.push(combination);
        true
    }
}

/// Counters from one run of the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStatistics {
    /// Frames popped off the work stack
    pub frames_expanded: u64,
    /// Branches cut by the fit test or the remaining-length bound
    pub branches_pruned: u64,
    /// Complete combinations handed to the sink
    pub combinations_emitted: u64,
    /// The run ended early (stop flag, deadline or closed sink)
    pub interrupted: bool,
}

impl EngineStatistics {
    pub fn merge(&mut self, other: &EngineStatistics) {
        self.frames_expanded += other.frames_expanded;
        self.branches_pruned += other.branches_pruned;
        self.combinations_emitted += other.combinations_emitted;
        self.interrupted |= other.interrupted;
    }
}

/// A pending node of the include/exclude tree
struct Frame<K> {
    /// Index of the next candidate to decide on
    next: usize,
    /// Indices of the candidates included so far
    chosen: Vec<usize>,
    /// Combined key of the chosen candidates
    key: K,
}

/// Branch-and-bound search over a fixed candidate list
pub struct BranchAndBound<'a, K> {
    candidates: &'a [Candidate<K>],
    target: &'a K,
    max_len: usize,
    deadline: Option<Instant>,
    stop: Option<&'a AtomicBool>,
    partition: usize,
    num_partitions: usize,
}

impl<'a, K: LetterMultiset> BranchAndBound<'a, K> {
    pub fn new(candidates: &'a [Candidate<K>], target: &'a K, max_len: usize) -> Self {
        Self {
            candidates,
            target,
            max_len,
            deadline: None,
            stop: None,
            partition: 0,
            num_partitions: 1,
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Poll `stop` before expanding each frame
    pub fn with_stop_flag(mut self, stop: &'a AtomicBool) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Restrict the search to the combinations whose first chosen candidate
    /// index `i` satisfies `i % num_partitions == partition`.
    pub fn with_partition(mut self, partition: usize, num_partitions: usize) -> Self {
        self.partition = partition;
        self.num_partitions = num_partitions.max(1);
        self
    }

    /// Search this engine's partition (the whole space by default).
    pub fn search<S: CombinationSink>(&self, sink: &mut S) -> EngineStatistics {
        let mut stats = EngineStatistics::default();
        let n = self.candidates.len();
        if self.max_len == 0 || self.max_len > n {
            return stats;
        }

        let empty = K::empty();
        for root in (self.partition..n).step_by(self.num_partitions) {
            // Every later root has even fewer candidates after it
            if n - root - 1 < self.max_len - 1 {
                break;
            }
            let key = empty.combine(&self.candidates[root].key);
            if !key.fits_within(self.target) {
                stats.branches_pruned += 1;
                continue;
            }
            trace!("expanding root {} ({})", root, self.candidates[root].word);
            let frame = Frame {
                next: root + 1,
                chosen: vec![root],
                key,
            };
            if !self.expand(frame, sink, &mut stats) {
                stats.interrupted = true;
                break;
            }
        }
        stats
    }

    fn should_stop(&self, frames_expanded: u64) -> bool {
        if self.stop.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return true;
        }
        frames_expanded % DEADLINE_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Walk the subtree below `root`. Returns false if the run was interrupted.
    fn expand<S: CombinationSink>(
        &self,
        root: Frame<K>,
        sink: &mut S,
        stats: &mut EngineStatistics,
    ) -> bool {
        let n = self.candidates.len();
        let mut stack = vec![root];

        while let Some(frame) = stack.pop() {
            if self.should_stop(stats.frames_expanded) {
                return false;
            }
            stats.frames_expanded += 1;

            if frame.chosen.len() == self.max_len {
                if frame.key == *self.target {
                    let combination: Combination = frame
                        .chosen
                        .iter()
                        .map(|&i| self.candidates[i].word.clone())
                        .collect();
                    trace!("emitting {:?}", combination);
                    stats.combinations_emitted += 1;
                    if !sink.emit(combination) {
                        return false;
                    }
                }
                continue;
            }

            let slots_left = self.max_len - frame.chosen.len();
            if frame.next >= n || n - frame.next < slots_left {
                stats.branches_pruned += 1;
                continue;
            }

            let included_key = frame.key.combine(&self.candidates[frame.next].key);
            let include = if included_key.fits_within(self.target) {
                let mut chosen = frame.chosen.clone();
                chosen.push(frame.next);
                Some(Frame {
                    next: frame.next + 1,
                    chosen,
                    key: included_key,
                })
            } else {
                stats.branches_pruned += 1;
                None
            };

            // Pushed last so it is popped first: include before exclude.
            stack.push(Frame {
                next: frame.next + 1,
                chosen: frame.chosen,
                key: frame.key,
            });
            if let Some(include) = include {
                stack.push(include);
            }
        }
        true
    }
}
