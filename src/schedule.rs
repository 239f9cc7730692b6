//! Turns an ordered tour into arrival, departure and wait times.
//!
//! Infeasibility is reported, never repaired: a stop that overruns its
//! closing time or the end of the day sets `violated` and the schedule
//! carries on from the late departure.

use crate::matrix::DistanceMatrix;
use crate::model::Stop;
use crate::time::TimeOfDay;

/// Timing of one tour position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStop {
    /// Input position of the stop.
    pub stop: usize,
    pub arrive: TimeOfDay,
    pub depart: TimeOfDay,
    pub wait_min: u32,
    pub stay_min: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Aligned 1:1 with the tour.
    pub stops: Vec<ScheduledStop>,
    pub travel_sec: i64,
    /// Saturates at `u32::MAX`.
    pub stay_min: u32,
    /// Saturates at `u32::MAX`.
    pub wait_min: u32,
    pub violated: bool,
}

/// Simulates the day for `route` starting at `day_start`.
///
/// Travel legs are the matrix durations rounded to whole seconds. Arriving
/// before a stop opens waits until it opens.
pub fn schedule<I>(
    stops: &[Stop<I>],
    route: &[usize],
    matrix: &DistanceMatrix,
    day_start: TimeOfDay,
    day_end: TimeOfDay,
) -> Schedule {
    let mut result = Schedule {
        stops: Vec::with_capacity(route.len()),
        travel_sec: 0,
        stay_min: 0,
        wait_min: 0,
        violated: false,
    };

    let mut time = day_start;
    for (k, &current) in route.iter().enumerate() {
        if k > 0 {
            let travel = matrix.get(route[k - 1], current).round() as i64;
            result.travel_sec += travel;
            time = time.plus_seconds(travel);
        }

        let stop = &stops[current];
        let mut arrive = time;
        let mut wait_min = 0;
        if let Some(open) = stop.open {
            if arrive < open {
                wait_min = arrive.minutes_until(open);
                arrive = open;
            }
        }

        let depart = arrive.plus_minutes(stop.stay_min);
        if stop.close.is_some_and(|close| depart > close) || depart > day_end {
            result.violated = true;
        }

        result.stay_min = result.stay_min.saturating_add(stop.stay_min);
        result.wait_min = result.wait_min.saturating_add(wait_min);
        result.stops.push(ScheduledStop {
            stop: current,
            arrive,
            depart,
            wait_min,
            stay_min: stop.stay_min,
        });
        time = depart;
    }

    result
}
