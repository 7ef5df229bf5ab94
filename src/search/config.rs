//! Configuration types for the combination search

use std::time::Duration;

/// Letter-multiset encoding used by the search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Product of per-letter primes, pruned by divisibility
    #[default]
    Primes,
    /// Per-letter occurrence counts, pruned component-wise
    Counts,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Primes => write!(f, "primes"),
            Encoding::Counts => write!(f, "counts"),
        }
    }
}

impl std::str::FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primes" | "prime" | "product" => Ok(Encoding::Primes),
            "counts" | "count" | "vector" => Ok(Encoding::Counts),
            _ => Err(format!(
                "Unknown encoding: '{}'. Valid options: primes, counts",
                s
            )),
        }
    }
}

/// Main search configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of words in a complete combination
    pub max_len: usize,
    /// Letter-multiset encoding
    pub encoding: Encoding,
    /// Overall deadline for the search (None = run to completion)
    pub timeout: Option<Duration>,
    /// Stop all work once a solution has been reported
    pub stop_on_solution: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_len: 3,
            encoding: Encoding::default(),
            timeout: None,
            stop_on_solution: true,
        }
    }
}

impl SearchConfig {
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_stop_on_solution(mut self, stop: bool) -> Self {
        self.stop_on_solution = stop;
        self
    }

    /// Keep searching after a solution has been found
    pub fn exhaustive(mut self) -> Self {
        self.stop_on_solution = false;
        self
    }
}
