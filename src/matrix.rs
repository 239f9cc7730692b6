//! Travel-duration matrix for a single optimization call.
//!
//! The provider is asked exactly once, with the stops in input order. All
//! later steps index the matrix by input position, never by tour position.

use tracing::debug;

use crate::error::PlanError;
use crate::model::Stop;
use crate::traits::{DurationMatrixProvider, TravelProfile};

/// Cost used for pairs the routing engine cannot connect.
pub const UNREACHABLE_SECONDS: f64 = 1e9;

/// Directed travel durations in seconds, indexed by input position.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    durations: Vec<f64>,
    symmetric: bool,
}

impl DistanceMatrix {
    /// Builds a matrix from provider rows.
    ///
    /// Fails unless there are at least `size` rows of at least `size` entries.
    /// Non-finite or negative durations are treated as unreachable.
    pub fn from_rows(size: usize, rows: Vec<Vec<f64>>) -> Result<Self, PlanError> {
        let short_row = rows.iter().take(size).position(|row| row.len() < size);
        if rows.len() < size || short_row.is_some() {
            return Err(PlanError::MatrixShape {
                expected: size,
                rows: rows.len(),
                short_row,
            });
        }

        let mut durations = Vec::with_capacity(size * size);
        for row in rows.into_iter().take(size) {
            durations.extend(row.into_iter().take(size).map(|value| {
                if value.is_finite() && value >= 0.0 {
                    value
                } else {
                    UNREACHABLE_SECONDS
                }
            }));
        }

        let symmetric = (0..size).all(|i| {
            (i + 1..size).all(|j| durations[i * size + j] == durations[j * size + i])
        });

        Ok(Self {
            size,
            durations,
            symmetric,
        })
    }

    /// An all-zero matrix, for days too small to need a provider.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            durations: vec![0.0; size * size],
            symmetric: true,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether `d(a, b) == d(b, a)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Duration from input position `from` to input position `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.durations[from * self.size + to]
    }

    /// Sum of directed edge costs along `route`.
    pub fn route_cost(&self, route: &[usize]) -> f64 {
        route.windows(2).map(|pair| self.get(pair[0], pair[1])).sum()
    }
}

/// Fetches the duration matrix for `stops` in their input order.
pub fn build_matrix<I, M>(
    provider: &M,
    profile: TravelProfile,
    stops: &[Stop<I>],
) -> Result<DistanceMatrix, PlanError>
where
    M: DurationMatrixProvider + ?Sized,
{
    let locations: Vec<(f64, f64)> = stops.iter().map(|stop| stop.location).collect();
    debug!(profile = %profile, locations = locations.len(), "requesting duration matrix");
    let rows = provider.matrix_for(profile, &locations)?;
    DistanceMatrix::from_rows(locations.len(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::cell::Cell;

    fn stop(id: u32, lat: f64) -> Stop<u32> {
        Stop {
            id,
            location: (lat, 0.0),
            stay_min: 60,
            open: None,
            close: None,
            locked: false,
        }
    }

    struct CountingProvider {
        calls: Cell<usize>,
        rows: Vec<Vec<f64>>,
    }

    impl DurationMatrixProvider for CountingProvider {
        fn matrix_for(
            &self,
            _profile: TravelProfile,
            _locations: &[(f64, f64)],
        ) -> Result<Vec<Vec<f64>>, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.rows.clone())
        }
    }

    #[test]
    fn test_build_matrix_calls_provider_once() {
        let provider = CountingProvider {
            calls: Cell::new(0),
            rows: vec![vec![0.0, 5.0], vec![7.0, 0.0]],
        };
        let matrix = build_matrix(&provider, TravelProfile::Walking, &[stop(1, 0.0), stop(2, 1.0)]).unwrap();
        assert_eq!(provider.calls.get(), 1);
        assert_eq!(matrix.get(0, 1), 5.0);
        assert_eq!(matrix.get(1, 0), 7.0);
        assert!(!matrix.is_symmetric());
    }

    #[test]
    fn test_short_matrix_is_rejected() {
        let err = DistanceMatrix::from_rows(3, vec![vec![0.0; 3], vec![0.0; 3]]).unwrap_err();
        assert!(matches!(err, PlanError::MatrixShape { expected: 3, rows: 2, .. }));

        let err = DistanceMatrix::from_rows(2, vec![vec![0.0, 1.0], vec![0.0]]).unwrap_err();
        assert!(matches!(err, PlanError::MatrixShape { short_row: Some(1), .. }));
    }

    #[test]
    fn test_invalid_entries_become_unreachable() {
        let matrix =
            DistanceMatrix::from_rows(2, vec![vec![0.0, f64::NAN], vec![-3.0, 0.0]]).unwrap();
        assert_eq!(matrix.get(0, 1), UNREACHABLE_SECONDS);
        assert_eq!(matrix.get(1, 0), UNREACHABLE_SECONDS);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn test_route_cost_is_directed() {
        let matrix = DistanceMatrix::from_rows(
            3,
            vec![vec![0.0, 1.0, 9.0], vec![2.0, 0.0, 3.0], vec![9.0, 4.0, 0.0]],
        )
        .unwrap();
        assert_eq!(matrix.route_cost(&[0, 1, 2]), 4.0);
        assert_eq!(matrix.route_cost(&[2, 1, 0]), 6.0);
        assert_eq!(matrix.route_cost(&[1]), 0.0);
    }
}
