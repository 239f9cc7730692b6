//! Day planner entry point.
//!
//! `optimize` validates the request, fetches the duration matrix once, builds
//! and improves a tour, schedules it, and finally asks for the geometry of
//! the chosen order.

use tracing::{debug, warn};

use crate::construct::nearest_insertion;
use crate::error::{AnchorRole, PlanError};
use crate::matrix::{build_matrix, DistanceMatrix};
use crate::model::{Anchors, DayPlan, DayRequest, Leg, Stop, DEFAULT_STAY_MINUTES};
use crate::polyline::Polyline;
use crate::schedule::{schedule, Schedule};
use crate::time::TimeOfDay;
use crate::traits::{DurationMatrixProvider, Id, RouteGeometryProvider, TravelProfile};
use crate::two_opt::{lock_mask, two_opt};

/// Day start used when the request gives none.
pub const DEFAULT_DAY_START: TimeOfDay = TimeOfDay::from_hm(10, 0);
/// Day end used when the request gives none.
pub const DEFAULT_DAY_END: TimeOfDay = TimeOfDay::from_hm(20, 0);

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// 2-opt may run at most `max(1, stops * passes_per_stop)` passes.
    pub passes_per_stop: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self { passes_per_stop: 4 }
    }
}

/// A request after validation, ready for the algorithm.
#[derive(Debug, Clone)]
pub struct PreparedDay<I> {
    pub profile: TravelProfile,
    pub day_start: TimeOfDay,
    pub day_end: TimeOfDay,
    pub stops: Vec<Stop<I>>,
    pub anchors: Anchors,
}

/// Plans one day.
///
/// Input errors are returned before either provider is called. A failing
/// duration provider fails the whole call; a failing geometry provider only
/// leaves the geometry empty.
pub fn optimize<I, M, G>(
    request: &DayRequest<I>,
    matrix_provider: &M,
    geometry_provider: &G,
    options: &PlanOptions,
) -> Result<DayPlan<I>, PlanError>
where
    I: Id,
    M: DurationMatrixProvider + ?Sized,
    G: RouteGeometryProvider + ?Sized,
{
    let day = prepare(request)?;
    let n = day.stops.len();

    if n < 2 {
        debug!(stops = n, "trivial day, skipping optimization");
        let route: Vec<usize> = (0..n).collect();
        let sched = schedule(&day.stops, &route, &DistanceMatrix::zeros(n), day.day_start, day.day_end);
        return Ok(assemble(&day.stops, &route, sched, Polyline::empty()));
    }

    let matrix = build_matrix(matrix_provider, day.profile, &day.stops)?;

    let mut route = nearest_insertion(&matrix, day.anchors);
    let constructed_cost = matrix.route_cost(&route);

    let locked = lock_mask(&day.stops, &route, day.anchors);
    let max_passes = (n * options.passes_per_stop).max(1);
    let outcome = two_opt(&mut route, &matrix, &locked, max_passes);
    if !outcome.converged {
        warn!(max_passes, moves = outcome.moves, "2-opt pass cap reached before a local optimum");
    }
    debug!(
        stops = n,
        constructed_cost,
        improved_cost = matrix.route_cost(&route),
        passes = outcome.passes,
        moves = outcome.moves,
        "tour optimized"
    );

    let sched = schedule(&day.stops, &route, &matrix, day.day_start, day.day_end);
    if sched.violated {
        debug!("schedule violates a time window");
    }

    let ordered: Vec<(f64, f64)> = route.iter().map(|&i| day.stops[i].location).collect();
    let geometry = match geometry_provider.geometry_for(day.profile, &ordered) {
        Ok(geometry) => geometry,
        Err(err) => {
            warn!(error = %err, "route geometry unavailable");
            Polyline::empty()
        }
    };

    Ok(assemble(&day.stops, &route, sched, geometry))
}

/// Validates a request without contacting any provider.
pub fn prepare<I: Id>(request: &DayRequest<I>) -> Result<PreparedDay<I>, PlanError> {
    let profile = TravelProfile::from_mode(request.profile.as_deref());
    let day_start = time_or("startTime", request.start_time.as_deref())?.unwrap_or(DEFAULT_DAY_START);
    let day_end = time_or("endTime", request.end_time.as_deref())?.unwrap_or(DEFAULT_DAY_END);

    let stops = request
        .stops
        .iter()
        .enumerate()
        .map(|(i, stop)| -> Result<Stop<I>, PlanError> {
            Ok(Stop {
                id: stop.id.clone(),
                location: (stop.lat, stop.lng),
                stay_min: stop.stay_min.unwrap_or(DEFAULT_STAY_MINUTES),
                open: time_or(&format!("stops[{i}].open"), stop.open.as_deref())?,
                close: time_or(&format!("stops[{i}].close"), stop.close.as_deref())?,
                locked: stop.locked,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let anchors = Anchors {
        start: anchor_position(&stops, request.start_id.as_ref(), AnchorRole::Start)?,
        end: anchor_position(&stops, request.end_id.as_ref(), AnchorRole::End)?,
    };
    if anchors.start.is_some() && anchors.start == anchors.end && stops.len() != 1 {
        return Err(PlanError::ConflictingAnchors);
    }

    Ok(PreparedDay {
        profile,
        day_start,
        day_end,
        stops,
        anchors,
    })
}

/// Parses an optional time; absent or blank means "not set".
fn time_or(field: &str, value: Option<&str>) -> Result<Option<TimeOfDay>, PlanError> {
    match value {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => TimeOfDay::parse(raw).map(Some).ok_or_else(|| PlanError::InvalidTime {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn anchor_position<I: Id>(stops: &[Stop<I>], id: Option<&I>, role: AnchorRole) -> Result<Option<usize>, PlanError> {
    let Some(id) = id else {
        return Ok(None);
    };
    stops
        .iter()
        .position(|stop| &stop.id == id)
        .map(Some)
        .ok_or_else(|| PlanError::UnknownAnchor {
            role,
            id: format!("{id:?}"),
        })
}

fn assemble<I: Id>(stops: &[Stop<I>], route: &[usize], sched: Schedule, geometry: Polyline) -> DayPlan<I> {
    let legs = sched
        .stops
        .iter()
        .map(|slot| Leg {
            id: stops[slot.stop].id.clone(),
            arrive: slot.arrive,
            depart: slot.depart,
            wait_min: slot.wait_min,
        })
        .collect();

    DayPlan {
        order: route.iter().map(|&i| stops[i].id.clone()).collect(),
        legs,
        total_travel_sec: sched.travel_sec,
        total_stay_min: sched.stay_min,
        total_wait_min: sched.wait_min,
        time_window_violated: sched.violated,
        geometry,
    }
}
