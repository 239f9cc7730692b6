//! Request, stop and response shapes.
//!
//! `DayRequest`/`StopRequest` mirror the JSON the caller sends (camelCase,
//! times as `HH:MM` strings). They are validated into [`Stop`] values before
//! any provider is contacted.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;
use crate::time::TimeOfDay;

/// Dwell time applied when a stop does not specify one.
pub const DEFAULT_STAY_MINUTES: u32 = 60;

/// One optimization request: a travel mode, a day window and the stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRequest<I> {
    /// `WALK` | `CAR` (also accepted under the `mode` key).
    #[serde(alias = "mode")]
    pub profile: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub start_id: Option<I>,
    pub end_id: Option<I>,
    #[serde(default = "Vec::new")]
    pub stops: Vec<StopRequest<I>>,
}

impl<I> DayRequest<I> {
    pub fn new(stops: Vec<StopRequest<I>>) -> Self {
        Self {
            profile: None,
            start_time: None,
            end_time: None,
            start_id: None,
            end_id: None,
            stops,
        }
    }

    pub fn profile(mut self, profile: &str) -> Self {
        self.profile = Some(profile.to_string());
        self
    }

    pub fn window(mut self, start: &str, end: &str) -> Self {
        self.start_time = Some(start.to_string());
        self.end_time = Some(end.to_string());
        self
    }

    pub fn start_at(mut self, id: I) -> Self {
        self.start_id = Some(id);
        self
    }

    pub fn end_at(mut self, id: I) -> Self {
        self.end_id = Some(id);
        self
    }
}

/// A candidate stop as sent by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRequest<I> {
    pub id: I,
    pub lat: f64,
    pub lng: f64,
    pub stay_min: Option<u32>,
    pub open: Option<String>,
    pub close: Option<String>,
    #[serde(default)]
    pub locked: bool,
}

impl<I> StopRequest<I> {
    pub fn new(id: I, lat: f64, lng: f64) -> Self {
        Self {
            id,
            lat,
            lng,
            stay_min: None,
            open: None,
            close: None,
            locked: false,
        }
    }

    pub fn stay(mut self, minutes: u32) -> Self {
        self.stay_min = Some(minutes);
        self
    }

    pub fn opens(mut self, open: &str) -> Self {
        self.open = Some(open.to_string());
        self
    }

    pub fn closes(mut self, close: &str) -> Self {
        self.close = Some(close.to_string());
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

/// A validated stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop<I> {
    pub id: I,
    pub location: (f64, f64),
    pub stay_min: u32,
    pub open: Option<TimeOfDay>,
    pub close: Option<TimeOfDay>,
    pub locked: bool,
}

/// Positions (in the input list) of the stops pinned to the tour ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// The planned day returned to the caller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan<I> {
    pub order: Vec<I>,
    pub legs: Vec<Leg<I>>,
    pub total_travel_sec: i64,
    pub total_stay_min: u32,
    pub total_wait_min: u32,
    pub time_window_violated: bool,
    pub geometry: Polyline,
}

/// Scheduled visit of one stop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg<I> {
    pub id: I,
    pub arrive: TimeOfDay,
    pub depart: TimeOfDay,
    pub wait_min: u32,
}
