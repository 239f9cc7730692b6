//! Duration and geometry providers with predictable behaviour.

use std::cell::{Cell, RefCell};

use day_planner::error::ProviderError;
use day_planner::polyline::Polyline;
use day_planner::traits::{DurationMatrixProvider, RouteGeometryProvider, TravelProfile};

/// Returns a fixed table regardless of the locations asked for.
pub struct TableMatrix {
    pub rows: Vec<Vec<f64>>,
    pub calls: Cell<usize>,
}

impl TableMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self {
            rows,
            calls: Cell::new(0),
        }
    }
}

impl DurationMatrixProvider for TableMatrix {
    fn matrix_for(
        &self,
        _profile: TravelProfile,
        _locations: &[(f64, f64)],
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.rows.clone())
    }
}

/// Manhattan distance * 60 = travel time in seconds (1 unit = 1 minute).
pub struct ManhattanMatrix;

impl DurationMatrixProvider for ManhattanMatrix {
    fn matrix_for(
        &self,
        _profile: TravelProfile,
        locations: &[(f64, f64)],
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        Ok(locations
            .iter()
            .map(|from| {
                locations
                    .iter()
                    .map(|to| ((from.0 - to.0).abs() + (from.1 - to.1).abs()) * 60.0)
                    .collect()
            })
            .collect())
    }
}

/// Always fails, counting how often it was asked.
#[derive(Default)]
pub struct FailingMatrix {
    pub calls: Cell<usize>,
}

impl DurationMatrixProvider for FailingMatrix {
    fn matrix_for(
        &self,
        _profile: TravelProfile,
        _locations: &[(f64, f64)],
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        self.calls.set(self.calls.get() + 1);
        Err(ProviderError::Api {
            code: "NoTable".to_string(),
            message: "routing backend down".to_string(),
        })
    }
}

/// Echoes the requested points as the geometry and records each request.
#[derive(Default)]
pub struct RecordingGeometry {
    pub requests: RefCell<Vec<(TravelProfile, Vec<(f64, f64)>)>>,
}

impl RouteGeometryProvider for RecordingGeometry {
    fn geometry_for(&self, profile: TravelProfile, locations: &[(f64, f64)]) -> Result<Polyline, ProviderError> {
        self.requests.borrow_mut().push((profile, locations.to_vec()));
        Ok(Polyline::new(locations.to_vec()))
    }
}

pub struct FailingGeometry;

impl RouteGeometryProvider for FailingGeometry {
    fn geometry_for(&self, _profile: TravelProfile, _locations: &[(f64, f64)]) -> Result<Polyline, ProviderError> {
        Err(ProviderError::Malformed("geometry missing".to_string()))
    }
}

/// Small deterministic generator for property-style tests.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// Uniform in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * (self.next_u32() as f64 / (u32::MAX as f64 + 1.0))
    }

    /// Square table with zero diagonal; asymmetric unless `symmetric`.
    pub fn table(&mut self, n: usize, symmetric: bool) -> Vec<Vec<f64>> {
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j || (symmetric && j < i) {
                    continue;
                }
                rows[i][j] = self.range(60.0, 3600.0).round();
                if symmetric {
                    rows[j][i] = rows[i][j];
                }
            }
        }
        rows
    }
}
