//! Parallel search coordinator that manages search and verification threads.

use crate::error::ConfigError;
use crate::fingerprint::LetterMultiset;
use crate::search::candidate::Candidate;
use crate::search::config::SearchConfig;
use crate::search::engine::{BranchAndBound, EngineStatistics};
use crate::search::parallel::channel::{
    CoordinatorChannels, Job, SearchChannels, VerifyChannels, WorkerMessage, create_channels,
};
use crate::search::parallel::config::ParallelConfig;
use crate::search::result::{SearchOutcome, SearchStatistics};
use crate::verify::{ControlDigests, Solution, verify_combination};
use crossbeam_channel::RecvTimeoutError;
use log::{debug, info, warn};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Result from parallel search execution.
#[derive(Debug)]
pub struct ParallelResult {
    /// Solutions and statistics aggregated from all workers.
    pub outcome: SearchOutcome,
    /// Per-search-worker statistics.
    pub worker_statistics: Vec<(usize, EngineStatistics)>,
}

/// Run the search and verification workers to completion.
///
/// Search worker `w` explores partition `w` of the combination space and
/// pushes matching combinations onto the work queue. Verification workers
/// pull from the queue until they receive a shutdown sentinel, which the
/// coordinator sends once every search worker has finished.
///
/// An invalid `parallel_config` is rejected before any thread starts.
pub fn run_parallel_search<K: LetterMultiset>(
    candidates: Vec<Candidate<K>>,
    target: K,
    digests: ControlDigests,
    search_config: &SearchConfig,
    parallel_config: &ParallelConfig,
) -> Result<ParallelResult, ConfigError> {
    parallel_config.validate()?;

    let start_time = Instant::now();
    let deadline = search_config.timeout.map(|t| start_time + t);
    let num_search = parallel_config.num_search_workers;
    let num_verify = parallel_config.num_verify_workers;

    let (coordinator_channels, search_channels, verify_channels) =
        create_channels(num_search, num_verify, parallel_config.queue_capacity);

    let num_candidates = candidates.len();
    let candidates = Arc::new(candidates);
    let target = Arc::new(target);
    let digests = Arc::new(digests);
    let stop_on_solution = search_config.stop_on_solution;
    let max_len = search_config.max_len;

    debug!(
        "starting {} workers ({} search, {} verification) over {} candidates",
        parallel_config.total_workers(),
        num_search,
        num_verify,
        num_candidates
    );

    let verify_handles: Vec<_> = verify_channels
        .into_iter()
        .enumerate()
        .map(|(worker_id, channels)| {
            let digests = Arc::clone(&digests);
            std::thread::spawn(move || {
                run_verify_worker(worker_id, &digests, stop_on_solution, channels)
            })
        })
        .collect();

    let search_handles: Vec<_> = search_channels
        .into_iter()
        .enumerate()
        .map(|(worker_id, channels)| {
            let candidates = Arc::clone(&candidates);
            let target = Arc::clone(&target);
            std::thread::spawn(move || {
                run_search_worker(
                    worker_id,
                    num_search,
                    &candidates,
                    &target,
                    max_len,
                    deadline,
                    channels,
                )
            })
        })
        .collect();

    let mut statistics = SearchStatistics::new(search_config.encoding, num_candidates);
    let mut result = run_coordinator(
        coordinator_channels,
        &search_handles,
        num_verify,
        deadline,
        &mut statistics,
    );

    for handle in search_handles.into_iter().chain(verify_handles) {
        if handle.join().is_err() {
            warn!("worker thread panicked");
        }
    }

    statistics.elapsed_time = start_time.elapsed();
    result.outcome.statistics = statistics;
    Ok(result)
}

/// Aggregates worker messages for the coordinator.
#[derive(Default)]
struct Tally {
    solutions: Vec<Solution>,
    worker_statistics: Vec<(usize, EngineStatistics)>,
    searches_finished: usize,
    verifiers_finished: usize,
}

impl Tally {
    fn record(&mut self, message: WorkerMessage, statistics: &mut SearchStatistics) {
        match message {
            WorkerMessage::SearchFinished {
                worker_id,
                statistics: stats,
            } => {
                debug!(
                    "search worker {} finished: {} frames, {} emitted",
                    worker_id, stats.frames_expanded, stats.combinations_emitted
                );
                self.searches_finished += 1;
                statistics.engine.merge(&stats);
                self.worker_statistics.push((worker_id, stats));
            }
            WorkerMessage::Solution {
                worker_id,
                solution,
            } => {
                info!("verification worker {} found: {}", worker_id, solution);
                self.solutions.push(solution);
            }
            WorkerMessage::VerifyFinished {
                worker_id,
                combinations_verified,
                combinations_skipped,
                orderings_hashed,
            } => {
                debug!(
                    "verification worker {} finished: {} combinations verified",
                    worker_id, combinations_verified
                );
                self.verifiers_finished += 1;
                statistics.combinations_verified += combinations_verified;
                statistics.combinations_skipped += combinations_skipped;
                statistics.orderings_hashed += orderings_hashed;
            }
        }
    }
}

/// Coordinator loop that receives messages from workers and aggregates results.
fn run_coordinator(
    channels: CoordinatorChannels,
    search_handles: &[JoinHandle<()>],
    num_verify: usize,
    deadline: Option<Instant>,
    statistics: &mut SearchStatistics,
) -> ParallelResult {
    let mut tally = Tally::default();
    let mut sentinels_sent = false;
    let mut deadline_passed = false;
    let mut stopped_by_deadline = false;

    loop {
        if !deadline_passed && deadline.is_some_and(|d| Instant::now() >= d) {
            deadline_passed = true;
            // A stop raised by a solution is not a timeout.
            if !channels.shared.should_stop() {
                info!("search deadline reached, stopping workers");
                stopped_by_deadline = true;
                channels.shared.signal_stop();
            }
        }

        // A search worker that died without reporting still counts as done.
        if !sentinels_sent
            && (tally.searches_finished >= search_handles.len()
                || search_handles.iter().all(|h| h.is_finished()))
        {
            debug!("all search workers finished, sending {} sentinels", num_verify);
            channels.shutdown_verifiers(num_verify);
            sentinels_sent = true;
        }

        if sentinels_sent && tally.verifiers_finished >= num_verify {
            break;
        }

        // Receive with timeout to allow periodic checks
        match channels.from_workers.recv_timeout(Duration::from_millis(50)) {
            Ok(message) => tally.record(message, statistics),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // All senders dropped, we're done
                break;
            }
        }
    }

    // Reports from search workers that finished before we saw their message
    for message in channels.from_workers.try_iter() {
        tally.record(message, statistics);
    }

    // Work that completed before the stop landed did not time out.
    let timed_out = stopped_by_deadline
        && (statistics.engine.interrupted || statistics.combinations_skipped > 0);

    let mut worker_statistics = tally.worker_statistics;
    worker_statistics.sort_by_key(|(worker_id, _)| *worker_id);
    ParallelResult {
        outcome: SearchOutcome {
            solutions: tally.solutions,
            timed_out,
            statistics: SearchStatistics::default(),
        },
        worker_statistics,
    }
}

/// Search worker: explore one partition and push matches onto the queue.
fn run_search_worker<K: LetterMultiset>(
    worker_id: usize,
    num_partitions: usize,
    candidates: &[Candidate<K>],
    target: &K,
    max_len: usize,
    deadline: Option<Instant>,
    channels: SearchChannels,
) {
    let engine = BranchAndBound::new(candidates, target, max_len)
        .with_partition(worker_id, num_partitions)
        .with_deadline(deadline)
        .with_stop_flag(&channels.shared.should_stop);

    let mut sink = channels.jobs.clone();
    let statistics = engine.search(&mut sink);

    let _ = channels.to_coordinator.send(WorkerMessage::SearchFinished {
        worker_id,
        statistics,
    });
}

/// Verification worker: check combinations until the shutdown sentinel.
fn run_verify_worker(
    worker_id: usize,
    digests: &ControlDigests,
    stop_on_solution: bool,
    channels: VerifyChannels,
) {
    let mut combinations_verified = 0;
    let mut combinations_skipped = 0;
    let mut orderings_hashed = 0;

    loop {
        match channels.jobs.recv() {
            Ok(Job::Verify(combination)) => {
                // Keep draining after a stop so producers never block.
                if channels.shared.should_stop() {
                    combinations_skipped += 1;
                    continue;
                }
                let verification = verify_combination(&combination, digests);
                combinations_verified += 1;
                orderings_hashed += verification.orderings_hashed;

                if let Some(solution) = verification.solution {
                    let _ = channels
                        .to_coordinator
                        .send(WorkerMessage::Solution { worker_id, solution });
                    if stop_on_solution {
                        channels.shared.signal_stop();
                    }
                }
            }
            Ok(Job::Shutdown) | Err(_) => break,
        }
    }

    let _ = channels.to_coordinator.send(WorkerMessage::VerifyFinished {
        worker_id,
        combinations_verified,
        combinations_skipped,
        orderings_hashed,
    });
}
