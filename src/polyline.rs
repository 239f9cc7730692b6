//! Route geometry returned alongside a day plan.
//!
//! Points are kept as decoded `(lat, lng)` pairs. On the wire the geometry
//! is a GeoJSON LineString (`[lng, lat]` positions), and an empty geometry
//! serializes as `{}` so clients can test for presence without a null.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A path through the planned stops, for map rendering only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a polyline from `(lat, lng)` points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a polyline from GeoJSON `[lng, lat]` positions.
    pub fn from_lng_lat(positions: &[[f64; 2]]) -> Self {
        Self::new(positions.iter().map(|[lng, lat]| (*lat, *lng)).collect())
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

impl Serialize for Polyline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.points.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }
        let coordinates: Vec<[f64; 2]> = self.points.iter().map(|(lat, lng)| [*lng, *lat]).collect();
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "LineString")?;
        map.serialize_entry("coordinates", &coordinates)?;
        map.end()
    }
}
