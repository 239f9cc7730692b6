//! Interfaces to the external collaborators the planner consumes.
//!
//! Both providers receive coordinates in the order the planner wants them
//! and answer for that order. Implementations own any caching, retry, or
//! locking they need.

use std::fmt;
use std::hash::Hash;

use crate::error::ProviderError;
use crate::polyline::Polyline;

/// Caller-chosen stop identifier.
pub trait Id: Clone + Eq + Hash + fmt::Debug {}

impl<T> Id for T where T: Clone + Eq + Hash + fmt::Debug {}

/// Travel mode used for both durations and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TravelProfile {
    #[default]
    Walking,
    Driving,
}

impl TravelProfile {
    /// Maps a request mode onto a profile.
    ///
    /// `CAR`, `DRIVE` and `DRIVING` (any case) select driving; anything else,
    /// including no mode at all, selects walking.
    pub fn from_mode(mode: Option<&str>) -> Self {
        match mode.map(str::trim) {
            Some(m)
                if m.eq_ignore_ascii_case("car")
                    || m.eq_ignore_ascii_case("drive")
                    || m.eq_ignore_ascii_case("driving") =>
            {
                TravelProfile::Driving
            }
            _ => TravelProfile::Walking,
        }
    }

    /// Profile segment used in OSRM service URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelProfile::Walking => "walking",
            TravelProfile::Driving => "driving",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provides a directed travel-duration table for a set of locations.
///
/// `result[i][j]` is the duration in seconds from `locations[i]` to
/// `locations[j]`. Unreachable pairs carry a large sentinel instead of
/// failing the call.
pub trait DurationMatrixProvider {
    fn matrix_for(
        &self,
        profile: TravelProfile,
        locations: &[(f64, f64)],
    ) -> Result<Vec<Vec<f64>>, ProviderError>;
}

/// Provides a renderable path through locations in the given order.
pub trait RouteGeometryProvider {
    fn geometry_for(
        &self,
        profile: TravelProfile,
        locations: &[(f64, f64)],
    ) -> Result<Polyline, ProviderError>;
}

impl<T: DurationMatrixProvider + ?Sized> DurationMatrixProvider for &T {
    fn matrix_for(
        &self,
        profile: TravelProfile,
        locations: &[(f64, f64)],
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        (**self).matrix_for(profile, locations)
    }
}

impl<T: RouteGeometryProvider + ?Sized> RouteGeometryProvider for &T {
    fn geometry_for(
        &self,
        profile: TravelProfile,
        locations: &[(f64, f64)],
    ) -> Result<Polyline, ProviderError> {
        (**self).geometry_for(profile, locations)
    }
}
