//! Haversine duration provider (fallback when OSRM unavailable).
//!
//! Uses great-circle distance and an assumed speed per travel profile.
//! Less accurate than OSRM (ignores roads and one-way streets) but always
//! available and always symmetric.

use rayon::prelude::*;

use crate::error::ProviderError;
use crate::traits::{DurationMatrixProvider, TravelProfile};

/// Average walking speed assumption.
const DEFAULT_WALKING_KMH: f64 = 4.5;

/// Average urban driving speed assumption.
const DEFAULT_DRIVING_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based duration provider.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    pub walking_kmh: f64,
    pub driving_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            walking_kmh: DEFAULT_WALKING_KMH,
            driving_kmh: DEFAULT_DRIVING_KMH,
        }
    }
}

impl HaversineMatrix {
    pub fn new(walking_kmh: f64, driving_kmh: f64) -> Self {
        Self {
            walking_kmh,
            driving_kmh,
        }
    }

    /// Calculate haversine distance between two points in kilometers.
    pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn speed_kmh(&self, profile: TravelProfile) -> f64 {
        match profile {
            TravelProfile::Walking => self.walking_kmh,
            TravelProfile::Driving => self.driving_kmh,
        }
    }

    /// Travel time in whole seconds for `km` at the profile's speed.
    fn km_to_seconds(&self, profile: TravelProfile, km: f64) -> f64 {
        (km / self.speed_kmh(profile) * 3600.0).round()
    }
}

impl DurationMatrixProvider for HaversineMatrix {
    fn matrix_for(
        &self,
        profile: TravelProfile,
        locations: &[(f64, f64)],
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        if self.speed_kmh(profile) <= 0.0 {
            return Err(ProviderError::Malformed(format!("non-positive {profile} speed")));
        }

        Ok(locations
            .par_iter()
            .enumerate()
            .map(|(i, from)| {
                locations
                    .iter()
                    .enumerate()
                    .map(|(j, to)| {
                        if i == j {
                            0.0
                        } else {
                            self.km_to_seconds(profile, Self::haversine_km(*from, *to))
                        }
                    })
                    .collect()
            })
            .collect())
    }
}
