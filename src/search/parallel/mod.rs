//! Parallel search execution.
//!
//! # Architecture
//!
//! A run consists of:
//! - **Search workers**, each exploring a disjoint partition of the
//!   combination space and pushing complete combinations onto a work queue
//! - **Verification workers** pulling from the queue and hashing every word
//!   ordering of each combination
//! - A **coordinator** that aggregates reports, pushes one shutdown sentinel
//!   per verification worker once all search workers are done, and enforces
//!   the deadline
//! - **Shared state** holding the stop flag raised on timeout or on the first
//!   solution
//!
//! # Example
//!
//! ```ignore
//! let config = ParallelConfig::default()
//!     .with_search_workers(4)
//!     .with_verify_workers(2);
//!
//! let result = run_parallel_search(candidates, target, digests, &search_config, &config);
//! ```

pub mod channel;
pub mod config;
pub mod coordinator;

pub use config::ParallelConfig;
pub use coordinator::{ParallelResult, run_parallel_search};
