//! Google Directions HTTP adapter for the routing oracle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::OracleError;
use crate::traits::{LegEstimate, RoutingOracle, WaypointOrder};

pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

#[derive(Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_DIRECTIONS_URL.to_string(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }
}

impl fmt::Debug for DirectionsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectionsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleDirectionsClient {
    /// Build a client whose requests time out after `config.timeout_secs`.
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn directions(&self, params: &[(&str, String)]) -> Result<DirectionsResponse, OracleError> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(params)
            .query(&[("mode", "driving"), ("key", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DirectionsResponse>())?;

        Ok(response)
    }
}

impl RoutingOracle for GoogleDirectionsClient {
    fn resolve_order(&self, depot: &str, stops: &[String]) -> Result<WaypointOrder, OracleError> {
        let waypoints = std::iter::once("optimize:true")
            .chain(stops.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("|");

        debug!(depot, stops = stops.len(), "requesting optimized waypoint order");
        let body = self.directions(&[
            ("origin", depot.to_string()),
            ("destination", depot.to_string()),
            ("waypoints", waypoints),
        ])?;

        waypoint_order_from(body)
    }

    fn estimate_leg(
        &self,
        origin: &str,
        destination: &str,
        departure: DateTime<Utc>,
    ) -> Result<LegEstimate, OracleError> {
        debug!(origin, destination, %departure, "requesting leg estimate");
        let body = self.directions(&[
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("departure_time", departure.timestamp().to_string()),
            ("traffic_model", "best_guess".to_string()),
        ])?;

        leg_estimate_from(body)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
    #[serde(default)]
    waypoint_order: Option<Vec<usize>>,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    duration: Option<TextValue>,
    duration_in_traffic: Option<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: f64,
}

fn first_route(body: DirectionsResponse) -> Result<DirectionsRoute, OracleError> {
    match body.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Err(OracleError::NoRoute),
        _ => {
            return Err(OracleError::Api {
                status: body.status,
                message: body.error_message.unwrap_or_default(),
            });
        }
    }

    body.routes.into_iter().next().ok_or(OracleError::NoRoute)
}

fn waypoint_order_from(body: DirectionsResponse) -> Result<WaypointOrder, OracleError> {
    let route = first_route(body)?;
    Ok(WaypointOrder {
        waypoint_order: route.waypoint_order,
    })
}

/// Sum the legs of the first route. A duration kind missing from any leg is
/// missing from the estimate.
fn leg_estimate_from(body: DirectionsResponse) -> Result<LegEstimate, OracleError> {
    let route = first_route(body)?;
    if route.legs.is_empty() {
        return Err(OracleError::MalformedResponse("route has no legs".to_string()));
    }

    let duration_seconds = route
        .legs
        .iter()
        .map(|leg| leg.duration.as_ref().map(|d| d.value))
        .sum::<Option<f64>>();
    let duration_in_traffic_seconds = route
        .legs
        .iter()
        .map(|leg| leg.duration_in_traffic.as_ref().map(|d| d.value))
        .sum::<Option<f64>>();

    Ok(LegEstimate {
        duration_seconds,
        duration_in_traffic_seconds,
    })
}
