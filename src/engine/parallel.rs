#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Frontier distribution: splitting one search into many independent
//! subtree searches that worker threads can run to completion.

use crate::engine::propagation::Fixpoint;
use crate::engine::puzzle::Puzzle;
use crate::engine::search::{ProgressSink, SearchStats};
use crate::engine::solution::SolutionSet;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How many search prefixes to aim for when none is specified.
pub const DEFAULT_TASK_TARGET: usize = 50;

/// Breadth-first pre-pass over the branch tree, stopping once roughly
/// `target` prefixes exist. Each returned prefix is a chain of candidates
/// whose subtree a worker can search independently; prefixes that already
/// solve outright are kept as trivial tasks, and prefixes that already
/// contradict are dropped along with their empty subtrees.
#[must_use]
pub fn enumerate_frontier(base: &Puzzle, target: usize) -> Vec<Vec<usize>> {
    let mut queue: VecDeque<Vec<usize>> = VecDeque::from([Vec::new()]);
    let mut settled: Vec<Vec<usize>> = Vec::new();
    while queue.len() + settled.len() < target {
        let Some(prefix) = queue.pop_front() else { break };
        let mut probe = base.clone();
        match probe.apply_prefix(&prefix) {
            Err(contradiction) => {
                log::debug!("dropping dead prefix of depth {}: {contradiction}", prefix.len());
            }
            Ok(Fixpoint::Solved) => settled.push(prefix),
            Ok(Fixpoint::Stuck) => {
                let members = probe
                    .branch_members()
                    .expect("a stuck grid always leaves an open group to branch on");
                for &member in &members {
                    let mut child = prefix.clone();
                    child.push(member);
                    queue.push_back(child);
                }
            }
        }
    }
    settled.extend(queue);
    settled
}

/// Per-worker progress shared with the supervising loop. The board is the
/// only state workers share; everything else is deep-copied.
#[derive(Debug)]
struct ProgressBoard {
    fractions: Vec<f64>,
    solutions: Vec<usize>,
    finished: Vec<bool>,
}

impl ProgressBoard {
    fn new(workers: usize) -> Self {
        Self {
            fractions: vec![0.0; workers],
            solutions: vec![0; workers],
            finished: vec![false; workers],
        }
    }
}

struct ProgressHandle {
    board: Arc<Mutex<ProgressBoard>>,
    worker: usize,
}

impl ProgressHandle {
    fn finish(&self, solutions_found: usize) {
        if let Ok(mut board) = self.board.lock() {
            board.fractions[self.worker] = 1.0;
            board.solutions[self.worker] = solutions_found;
            board.finished[self.worker] = true;
        }
    }
}

impl ProgressSink for ProgressHandle {
    fn report(&self, fraction: f64, solutions_found: usize) {
        if let Ok(mut board) = self.board.lock() {
            board.fractions[self.worker] = fraction;
            board.solutions[self.worker] = solutions_found;
        }
    }
}

/// Searches the puzzle with one thread per frontier prefix and merges every
/// worker's findings back into `puzzle`. Duplicate findings from overlapping
/// derivations collapse in the solution set.
pub fn solve_parallel(puzzle: &mut Puzzle, target_tasks: usize) -> &SolutionSet {
    let prefixes = enumerate_frontier(puzzle, target_tasks);
    log::info!("distributing {} search prefixes over threads", prefixes.len());
    let board = Arc::new(Mutex::new(ProgressBoard::new(prefixes.len())));
    let started = Instant::now();

    let workers: Vec<JoinHandle<(SolutionSet, SearchStats)>> = prefixes
        .into_iter()
        .enumerate()
        .map(|(worker, prefix)| {
            let mut copy = puzzle.clone();
            let sink = ProgressHandle {
                board: Arc::clone(&board),
                worker,
            };
            thread::spawn(move || {
                match copy.apply_prefix(&prefix) {
                    Err(contradiction) => {
                        log::debug!("worker {worker}: prefix contradicts: {contradiction}");
                    }
                    Ok(Fixpoint::Solved) => {}
                    Ok(Fixpoint::Stuck) => copy.solve_with_progress(&sink),
                }
                sink.finish(copy.solutions.len());
                (copy.solutions, copy.stats)
            })
        })
        .collect();

    supervise(&workers, &board, started);

    for worker in workers {
        if let Ok((found, stats)) = worker.join() {
            puzzle.solutions.absorb(found);
            puzzle.stats.branch_points += stats.branch_points;
            puzzle.stats.candidates_tried += stats.candidates_tried;
        }
    }
    log::info!(
        "parallel search finished: {} solutions, {} branch points",
        puzzle.solutions.len(),
        puzzle.stats.branch_points
    );
    &puzzle.solutions
}

/// Polls the board once a second until every worker is done, logging overall
/// progress, counts and a projected time to finish.
fn supervise(
    workers: &[JoinHandle<(SolutionSet, SearchStats)>],
    board: &Arc<Mutex<ProgressBoard>>,
    started: Instant,
) {
    while workers.iter().any(|w| !w.is_finished()) {
        thread::sleep(Duration::from_secs(1));
        let Ok(board) = board.lock() else { break };
        let total_workers = board.fractions.len().max(1);
        #[allow(clippy::cast_precision_loss)]
        let overall: f64 = board.fractions.iter().sum::<f64>() / total_workers as f64;
        let done = board.finished.iter().filter(|&&f| f).count();
        let solutions: usize = board.solutions.iter().sum();
        let elapsed = started.elapsed().as_secs_f64();
        let remaining = if overall > 0.0 {
            elapsed * (1.0 - overall) / overall
        } else {
            f64::INFINITY
        };
        log::info!(
            "{:5.1}% searched, {done}/{total_workers} tasks done, \
             {} running, {solutions} solutions so far, ~{remaining:.0}s remaining",
            overall * 100.0,
            total_workers - done,
        );
    }
}
