//! Configuration for parallel search execution.

use crate::error::ConfigError;

/// Configuration for parallel search execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of search worker threads (each owns one partition).
    pub num_search_workers: usize,
    /// Number of verification worker threads.
    pub num_verify_workers: usize,
    /// Capacity of the work queue (None = unbounded).
    pub queue_capacity: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_search_workers: num_cpus::get(),
            num_verify_workers: 1,
            queue_capacity: None,
        }
    }
}

impl ParallelConfig {
    pub fn with_search_workers(mut self, num_workers: usize) -> Self {
        self.num_search_workers = num_workers;
        self
    }

    pub fn with_verify_workers(mut self, num_workers: usize) -> Self {
        self.num_verify_workers = num_workers;
        self
    }

    /// Bound the work queue to `capacity` pending combinations.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Check that every pool has at least one worker and that a bounded
    /// queue can hold at least one combination.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_search_workers == 0 {
            return Err(ConfigError::new("at least one search worker is required"));
        }
        if self.num_verify_workers == 0 {
            return Err(ConfigError::new(
                "at least one verification worker is required",
            ));
        }
        if self.queue_capacity == Some(0) {
            return Err(ConfigError::new("queue capacity must be at least 1"));
        }
        Ok(())
    }

    /// Total number of worker threads.
    pub fn total_workers(&self) -> usize {
        self.num_search_workers + self.num_verify_workers
    }
}
