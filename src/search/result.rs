//! Search outcome and statistics

use crate::search::config::Encoding;
use crate::search::engine::EngineStatistics;
use crate::verify::Solution;
use std::time::Duration;

/// Result of a complete search run
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Verified solutions, in the order they were reported
    pub solutions: Vec<Solution>,
    /// The deadline passed before the search space was exhausted
    pub timed_out: bool,
    /// Statistics from the run
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    pub fn found_solution(&self) -> bool {
        !self.solutions.is_empty()
    }
}

/// Statistics from a search run
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Encoding used for the search
    pub encoding: Encoding,
    /// Number of candidate words
    pub candidates: usize,
    /// Total time spent searching
    pub elapsed_time: Duration,
    /// Counters summed over all search workers
    pub engine: EngineStatistics,
    /// Complete combinations checked by the verification workers
    pub combinations_verified: u64,
    /// Combinations dequeued after the stop flag and not checked
    pub combinations_skipped: u64,
    /// Word orderings hashed
    pub orderings_hashed: u64,
}

impl SearchStatistics {
    pub fn new(encoding: Encoding, candidates: usize) -> Self {
        Self {
            encoding,
            candidates,
            ..Default::default()
        }
    }

    /// Fraction of expanded frames that were cut (0.0 to 1.0)
    pub fn prune_rate(&self) -> f64 {
        if self.engine.frames_expanded == 0 {
            0.0
        } else {
            self.engine.branches_pruned as f64 / self.engine.frames_expanded as f64
        }
    }

    /// Frames expanded per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.engine.frames_expanded as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Encoding: {}\n", self.encoding));
        s.push_str(&format!("Candidates: {}\n", self.candidates));
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Frames expanded: {}\n", self.engine.frames_expanded));
        s.push_str(&format!(
            "Branches pruned: {} ({:.2}%)\n",
            self.engine.branches_pruned,
            self.prune_rate() * 100.0
        ));
        s.push_str(&format!("Throughput: {:.0} frames/sec\n", self.throughput()));
        s.push_str(&format!(
            "Combinations emitted: {}\n",
            self.engine.combinations_emitted
        ));
        s.push_str(&format!(
            "Combinations verified: {}\n",
            self.combinations_verified
        ));
        if self.combinations_skipped > 0 {
            s.push_str(&format!(
                "Combinations skipped: {}\n",
                self.combinations_skipped
            ));
        }
        s.push_str(&format!("Orderings hashed: {}\n", self.orderings_hashed));
        s
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.found_solution() {
            for solution in &self.solutions {
                writeln!(f, "SOLUTION: {}", solution)?;
            }
        } else {
            writeln!(f, "No solution found.")?;
        }
        if self.timed_out {
            writeln!(f, "Search timed out before the space was exhausted.")?;
        }
        Ok(())
    }
}
