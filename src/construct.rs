//! Initial tour construction: seeded nearest neighbour, then cheapest insertion.
//!
//! Candidates are enumerated by ascending input position, then ascending
//! insertion position; the first strictly cheaper candidate wins, so equal
//! costs always resolve the same way.

use crate::matrix::DistanceMatrix;
use crate::model::Anchors;

/// Builds a tour over every input position that honors `anchors`.
pub fn nearest_insertion(matrix: &DistanceMatrix, anchors: Anchors) -> Vec<usize> {
    let n = matrix.len();
    if n == 0 {
        return Vec::new();
    }

    // Seed is the start anchor, else index 0. Modified from plain "index 0":
    // an end anchor sitting at index 0 is skipped so it can still finish the tour.
    let seed = anchors
        .start
        .or_else(|| (0..n).find(|&i| Some(i) != anchors.end))
        .unwrap_or(0);

    let mut route = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    route.push(seed);
    placed[seed] = true;

    // The end anchor only goes second when nothing else is left.
    let others_left = n - 1 > 1;
    if let Some(next) = nearest_unplaced(matrix, seed, &placed, |candidate| {
        !(others_left && Some(candidate) == anchors.end)
    }) {
        route.push(next);
        placed[next] = true;
    }

    while route.len() < n {
        let mut best: Option<(usize, usize)> = None;
        let mut best_cost = f64::INFINITY;

        for candidate in (0..n).filter(|&c| !placed[c]) {
            for position in 0..=route.len() {
                if !can_place(&route, &placed, anchors, candidate, position) {
                    continue;
                }
                let cost = insertion_cost(matrix, &route, position, candidate);
                if cost < best_cost {
                    best_cost = cost;
                    best = Some((candidate, position));
                }
            }
        }

        let (candidate, position) = best.unwrap_or_else(|| fallback_placement(&route, &placed, anchors));
        route.insert(position, candidate);
        placed[candidate] = true;
    }

    if let Some(end) = anchors.end {
        if let Some(at) = route.iter().position(|&i| i == end) {
            let end = route.remove(at);
            route.push(end);
        }
    }

    route
}

fn nearest_unplaced(
    matrix: &DistanceMatrix,
    from: usize,
    placed: &[bool],
    allowed: impl Fn(usize) -> bool,
) -> Option<usize> {
    let mut best = None;
    let mut best_cost = f64::INFINITY;
    for candidate in (0..matrix.len()).filter(|&c| !placed[c] && allowed(c)) {
        let cost = matrix.get(from, candidate);
        if best.is_none() || cost < best_cost {
            best_cost = cost;
            best = Some(candidate);
        }
    }
    best
}

/// Cost delta of inserting `candidate` before `route[position]`.
fn insertion_cost(matrix: &DistanceMatrix, route: &[usize], position: usize, candidate: usize) -> f64 {
    if route.is_empty() {
        0.0
    } else if position == 0 {
        matrix.get(candidate, route[0])
    } else if position == route.len() {
        matrix.get(route[position - 1], candidate)
    } else {
        let prev = route[position - 1];
        let next = route[position];
        matrix.get(prev, candidate) + matrix.get(candidate, next) - matrix.get(prev, next)
    }
}

fn can_place(route: &[usize], placed: &[bool], anchors: Anchors, candidate: usize, position: usize) -> bool {
    if Some(candidate) == anchors.start {
        return position == 0;
    }
    if Some(candidate) == anchors.end {
        return position == route.len();
    }
    if anchors.start.is_some() && position == 0 {
        return false;
    }
    let end_placed = anchors.end.is_some_and(|end| placed[end]);
    !(end_placed && position == route.len())
}

fn fallback_placement(route: &[usize], placed: &[bool], anchors: Anchors) -> (usize, usize) {
    let candidate = (0..placed.len()).find(|&c| !placed[c]).unwrap_or(0);
    let end_placed = anchors.end.is_some_and(|end| placed[end]);
    let position = if end_placed && route.len() > 1 {
        route.len() - 1
    } else {
        route.len()
    };
    (candidate, position)
}
