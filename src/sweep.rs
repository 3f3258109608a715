//! One relaxation pass over the grid interior.
//!
//! Both variants read all of `input` and write only the interior of
//! `output`, returning the largest absolute per-cell change of the
//! pass. The destination boundary ring is never written, so it keeps
//! the values set at grid construction.

use crate::grid::Grid;
use crate::stencil;
use rayon::prelude::*;

/// How a single pass is executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Plain nested traversal on the calling thread.
    Sequential,

    /// Row-partitioned traversal on the rayon pool.
    Parallel,
}

impl ExecutionMode {
    /// Mode flag from the command line: 0 is sequential, anything
    /// else is parallel.
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Parallel
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

/// Run one pass in the given mode.
pub fn apply(mode: ExecutionMode, input: &Grid, output: &mut Grid) -> f32 {
    match mode {
        ExecutionMode::Sequential => sequential(input, output),
        ExecutionMode::Parallel => parallel(input, output),
    }
}

/// One pass, single-threaded.
///
/// The max-change comparison is strict, a tie does not replace the
/// running maximum.
pub fn sequential(input: &Grid, output: &mut Grid) -> f32 {
    profiling::scope!("sweep: sequential");
    debug_assert_eq!(input.size(), output.size());
    let n = input.size();
    let hi = n.saturating_sub(1);
    let src = input.buffer();
    let dst = output.buffer_mut();

    let mut max_change = 0.0f32;
    for i in 1..hi {
        for j in 1..hi {
            let idx = i * n + j;
            let next = stencil::four_point_mean(
                src[idx - n],
                src[idx + n],
                src[idx - 1],
                src[idx + 1],
            );
            let change = (next - src[idx]).abs();
            if change > max_change {
                max_change = change;
            }
            dst[idx] = next;
        }
    }
    max_change
}

/// One pass, row-partitioned across the rayon pool.
///
/// Each task owns exactly one destination row, so writes are disjoint
/// by construction; the source buffer is shared read-only. The
/// per-row maxima are combined with `f32::max`, which is commutative
/// and associative, so the result matches [`sequential`] bit for bit.
pub fn parallel(input: &Grid, output: &mut Grid) -> f32 {
    profiling::scope!("sweep: parallel");
    debug_assert_eq!(input.size(), output.size());
    let n = input.size();
    let hi = n.saturating_sub(1);
    if hi <= 1 {
        // No interior, nothing changes.
        return 0.0;
    }
    let src = input.buffer();
    let dst = output.buffer_mut();

    dst[n..hi * n]
        .par_chunks_mut(n)
        .enumerate()
        .map(|(row, dst_row)| {
            profiling::scope!("sweep: row task");
            let i = row + 1;
            let mut row_max = 0.0f32;
            for j in 1..hi {
                let idx = i * n + j;
                let next = stencil::four_point_mean(
                    src[idx - n],
                    src[idx + n],
                    src[idx - 1],
                    src[idx + 1],
                );
                let change = (next - src[idx]).abs();
                if change > row_max {
                    row_max = change;
                }
                dst_row[j] = next;
            }
            row_max
        })
        .reduce(|| 0.0, f32::max)
}
