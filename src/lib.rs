//! day-planner core
//!
//! Orders the stops of a single day, schedules them against opening hours
//! and the day window, and attaches route geometry for the chosen order.

pub mod traits;
pub mod error;
pub mod time;
pub mod model;
pub mod matrix;
pub mod construct;
pub mod two_opt;
pub mod schedule;
pub mod solver;
pub mod osrm;
pub mod haversine;
pub mod polyline;

pub use error::{PlanError, ProviderError};
pub use model::{DayPlan, DayRequest, Leg, StopRequest};
pub use solver::{optimize, PlanOptions};
pub use traits::TravelProfile;
