//! Fixed-point driver for the relaxation loop.

use crate::grid::Grid;
use crate::sweep;
use crate::sweep::ExecutionMode;
use std::time::{Duration, Instant};

/// Terminal state of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// The max change of a pass fell below the threshold.
    Converged,

    /// The iteration cap was hit first.
    MaxIterReached,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Converged => write!(f, "converged"),
            RunStatus::MaxIterReached => write!(f, "max iterations reached"),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SolverParameters {
    pub grid_size: usize,
    pub threshold: f32,
    pub max_iterations: usize,
    pub mode: ExecutionMode,
}

/// Result of a completed run.
///
/// `elapsed` covers the relaxation loop only, not grid allocation or
/// teardown.
#[derive(Copy, Clone, Debug)]
pub struct RunReport {
    pub status: RunStatus,
    pub iterations: usize,
    pub max_change: f32,
    pub elapsed: Duration,
}

/// Owns the two grid buffers and runs the relaxation loop to one of
/// the terminal states.
pub struct Solver {
    params: SolverParameters,
    current: Grid,
    next: Grid,
}

impl Solver {
    pub fn new(params: SolverParameters) -> Self {
        Solver {
            params,
            current: Grid::new(params.grid_size),
            next: Grid::new(params.grid_size),
        }
    }

    /// Run passes until a terminal state is reached.
    ///
    /// The loop body executes at least once, so the iteration count of
    /// the report is always >= 1. Each step reads all of `current`,
    /// writes the interior of `next`, swaps the two by ownership, then
    /// tests for termination. Convergence is tested before the
    /// iteration cap.
    pub fn solve(&mut self) -> RunReport {
        profiling::scope!("solver: solve");
        let mut iterations = 0usize;
        let start = Instant::now();
        let (status, max_change) = loop {
            let max_change =
                sweep::apply(self.params.mode, &self.current, &mut self.next);
            iterations += 1;
            std::mem::swap(&mut self.current, &mut self.next);
            if max_change < self.params.threshold {
                break (RunStatus::Converged, max_change);
            }
            if iterations >= self.params.max_iterations {
                break (RunStatus::MaxIterReached, max_change);
            }
        };
        let elapsed = start.elapsed();
        RunReport {
            status,
            iterations,
            max_change,
            elapsed,
        }
    }

    /// The grid holding the latest completed pass.
    pub fn grid(&self) -> &Grid {
        &self.current
    }
}
