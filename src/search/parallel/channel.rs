//! Work queue and reporting channels between search and verification workers.

use crate::search::candidate::Combination;
use crate::search::engine::{CombinationSink, EngineStatistics};
use crate::verify::Solution;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Item on the work queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// A complete combination to verify.
    Verify(Combination),
    /// Sentinel: the receiving verification worker stops.
    Shutdown,
}

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// A search worker has exhausted (or abandoned) its partition.
    SearchFinished {
        worker_id: usize,
        statistics: EngineStatistics,
    },
    /// A verification worker found an ordering with a control digest.
    Solution { worker_id: usize, solution: Solution },
    /// A verification worker received its sentinel.
    VerifyFinished {
        worker_id: usize,
        combinations_verified: u64,
        combinations_skipped: u64,
        orderings_hashed: u64,
    },
}

/// State shared by every worker of one search run.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Flag to signal all workers to stop.
    pub should_stop: AtomicBool,
}

impl SharedState {
    /// Check if we should stop searching.
    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Ordering::SeqCst)
    }

    /// Signal all workers to stop.
    pub fn signal_stop(&self) {
        self.should_stop.store(true, Ordering::SeqCst);
    }
}

/// Channel endpoints for a search worker.
pub struct SearchChannels {
    /// Push complete combinations onto the work queue.
    pub jobs: Sender<Job>,
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    pub shared: Arc<SharedState>,
}

/// Channel endpoints for a verification worker.
pub struct VerifyChannels {
    /// Pull combinations (or the sentinel) off the work queue.
    pub jobs: Receiver<Job>,
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    pub shared: Arc<SharedState>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
    /// Work queue sender, used to push one sentinel per verification worker.
    pub jobs: Sender<Job>,
    pub shared: Arc<SharedState>,
}

impl CoordinatorChannels {
    /// Push one shutdown sentinel per verification worker.
    ///
    /// Sentinels queue behind every combination already pushed, so each
    /// worker drains the remaining work before it sees one.
    pub fn shutdown_verifiers(&self, num_verify_workers: usize) {
        for _ in 0..num_verify_workers {
            if self.jobs.send(Job::Shutdown).is_err() {
                // Every receiver is gone; nobody is left to stop.
                break;
            }
        }
    }
}

impl CombinationSink for Sender<Job> {
    fn emit(&mut self, combination: Combination) -> bool {
        self.send(Job::Verify(combination)).is_ok()
    }
}

/// Create the channels for one search run.
pub fn create_channels(
    num_search_workers: usize,
    num_verify_workers: usize,
    queue_capacity: Option<usize>,
) -> (CoordinatorChannels, Vec<SearchChannels>, Vec<VerifyChannels>) {
    let shared = Arc::new(SharedState::default());

    // Unbounded channel from workers to coordinator (workers shouldn't block)
    let (worker_tx, coordinator_rx) = unbounded();

    let (job_tx, job_rx) = match queue_capacity {
        Some(capacity) => bounded(capacity),
        None => unbounded(),
    };

    let search_channels = (0..num_search_workers)
        .map(|_| SearchChannels {
            jobs: job_tx.clone(),
            to_coordinator: worker_tx.clone(),
            shared: Arc::clone(&shared),
        })
        .collect();

    let verify_channels = (0..num_verify_workers)
        .map(|_| VerifyChannels {
            jobs: job_rx.clone(),
            to_coordinator: worker_tx.clone(),
            shared: Arc::clone(&shared),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        jobs: job_tx,
        shared,
    };

    (coordinator, search_channels, verify_channels)
}
