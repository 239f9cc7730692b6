//! OSRM HTTP adapter for duration tables and route geometry.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ProviderError;
use crate::matrix::UNREACHABLE_SECONDS;
use crate::polyline::Polyline;
use crate::traits::{DurationMatrixProvider, RouteGeometryProvider, TravelProfile};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl OsrmConfig {
    /// Reads `OSRM_BASE_URL`, `OSRM_TIMEOUT_SECS` and `OSRM_CONNECT_TIMEOUT_SECS`,
    /// keeping the default for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            base_url: lookup("OSRM_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: lookup("OSRM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            connect_timeout_secs: lookup("OSRM_CONNECT_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connect_timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn service_url(&self, service: &str, profile: TravelProfile, locations: &[(f64, f64)], query: &str) -> String {
        format!(
            "{}/{}/v1/{}/{}?{}",
            self.config.base_url,
            service,
            profile,
            coordinates(locations),
            query
        )
    }

    /// Decodes the body whatever the status: OSRM answers `InvalidQuery`,
    /// `NoTable` and friends with a 400 and a JSON `code`. Only an
    /// undecodable body falls back to the HTTP status error.
    fn get<T: DeserializeOwned>(&self, url: String) -> Result<T, ProviderError> {
        debug!(%url, "OSRM request");
        let response = self.client.get(url).send()?;
        let status_error = response.error_for_status_ref().err();
        response.json::<T>().map_err(|err| status_error.unwrap_or(err).into())
    }
}

impl DurationMatrixProvider for OsrmClient {
    fn matrix_for(
        &self,
        profile: TravelProfile,
        locations: &[(f64, f64)],
    ) -> Result<Vec<Vec<f64>>, ProviderError> {
        if locations.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.service_url("table", profile, locations, "annotations=duration");
        table_durations(self.get(url)?)
    }
}

impl RouteGeometryProvider for OsrmClient {
    fn geometry_for(&self, profile: TravelProfile, locations: &[(f64, f64)]) -> Result<Polyline, ProviderError> {
        if locations.len() < 2 {
            return Ok(Polyline::empty());
        }
        let url = self.service_url("route", profile, locations, "overview=full&geometries=geojson");
        route_geometry(self.get(url)?)
    }
}

/// `lng,lat` pairs joined by `;`, six decimals.
fn coordinates(locations: &[(f64, f64)]) -> String {
    locations
        .iter()
        .map(|(lat, lng)| format!("{:.6},{:.6}", lng, lat))
        .collect::<Vec<_>>()
        .join(";")
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    message: Option<String>,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

fn check_code(code: String, message: Option<String>) -> Result<(), ProviderError> {
    if code == "Ok" {
        Ok(())
    } else {
        Err(ProviderError::Api {
            code,
            message: message.unwrap_or_default(),
        })
    }
}

fn table_durations(body: OsrmTableResponse) -> Result<Vec<Vec<f64>>, ProviderError> {
    check_code(body.code, body.message)?;
    let durations = body
        .durations
        .ok_or_else(|| ProviderError::Malformed("table response without durations".to_string()))?;
    Ok(durations
        .into_iter()
        .map(|row| row.into_iter().map(|value| value.unwrap_or(UNREACHABLE_SECONDS)).collect())
        .collect())
}

fn route_geometry(body: OsrmRouteResponse) -> Result<Polyline, ProviderError> {
    check_code(body.code, body.message)?;
    Ok(body
        .routes
        .into_iter()
        .next()
        .and_then(|route| route.geometry)
        .map(|geometry| Polyline::from_lng_lat(&geometry.coordinates))
        .unwrap_or_default())
}
