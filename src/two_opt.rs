//! Lock-aware intra-tour 2-opt.
//!
//! ```text
//! BEFORE:  ... r[i-1] --x--> r[i] -> ... -> r[k] --x--> r[k+1] ...
//! AFTER:   ... r[i-1] -----> r[k] -> ... -> r[i] -----> r[k+1] ...
//! ```
//!
//! The first and last tour positions never move, and neither does any
//! locked position: a segment is only reversed when none of its positions
//! is locked.

use crate::matrix::DistanceMatrix;
use crate::model::{Anchors, Stop};

/// Minimum gain for a move to count as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// How a 2-opt run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImproveOutcome {
    /// Full passes executed, including the final non-improving one.
    pub passes: usize,
    /// Segment reversals applied.
    pub moves: usize,
    /// False when the pass cap stopped the search early.
    pub converged: bool,
}

/// Marks tour positions that local search must not move.
pub fn lock_mask<I>(stops: &[Stop<I>], route: &[usize], anchors: Anchors) -> Vec<bool> {
    route
        .iter()
        .map(|&stop| Some(stop) == anchors.start || Some(stop) == anchors.end || stops[stop].locked)
        .collect()
}

/// Improves `route` in place until no reversal helps or `max_passes` runs out.
///
/// On asymmetric matrices the reversed interior edges are priced too, so every
/// accepted move strictly lowers [`DistanceMatrix::route_cost`].
pub fn two_opt(route: &mut [usize], matrix: &DistanceMatrix, locked: &[bool], max_passes: usize) -> ImproveOutcome {
    let n = route.len();
    let mut outcome = ImproveOutcome {
        passes: 0,
        moves: 0,
        converged: true,
    };
    if n < 4 {
        return outcome;
    }

    loop {
        if outcome.passes == max_passes {
            outcome.converged = false;
            return outcome;
        }
        outcome.passes += 1;

        let mut improved = false;
        for i in 1..n - 2 {
            if locked[i] {
                continue;
            }
            for k in i + 1..n - 1 {
                // Modified from the plain scan, which only skips locked `i`:
                // stop at a locked `k`, every longer segment would contain it too.
                if locked[k] {
                    break;
                }
                let delta = reversal_delta(route, matrix, i, k);
                if delta < -IMPROVEMENT_EPSILON {
                    route[i..=k].reverse();
                    outcome.moves += 1;
                    improved = true;
                }
            }
        }

        if !improved {
            return outcome;
        }
    }
}

/// Change in tour cost from reversing `route[i..=k]`.
///
/// The usual four-edge formula, modified for asymmetric matrices: the
/// reversed segment's interior edges are re-priced in the new direction.
fn reversal_delta(route: &[usize], matrix: &DistanceMatrix, i: usize, k: usize) -> f64 {
    let (prev, from, to, next) = (route[i - 1], route[i], route[k], route[k + 1]);
    let mut delta = -matrix.get(prev, from) - matrix.get(to, next) + matrix.get(prev, to) + matrix.get(from, next);

    if !matrix.is_symmetric() {
        delta += route[i..=k]
            .windows(2)
            .map(|pair| matrix.get(pair[1], pair[0]) - matrix.get(pair[0], pair[1]))
            .sum::<f64>();
    }

    delta
}
