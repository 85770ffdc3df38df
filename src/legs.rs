//! Closed-loop routes and per-leg traffic evaluation.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::OracleError;
use crate::traits::RoutingOracle;

/// Depot, stops in visiting order, depot again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    addresses: Vec<String>,
}

/// One directed origin -> destination segment of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
}

impl Route {
    pub fn closed_loop(depot: &str, stops: &[String]) -> Self {
        let mut addresses = Vec::with_capacity(stops.len() + 2);
        addresses.push(depot.to_string());
        addresses.extend(stops.iter().cloned());
        addresses.push(depot.to_string());
        Self { addresses }
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Stops between the two depot visits.
    pub fn stops(&self) -> &[String] {
        &self.addresses[1..self.addresses.len() - 1]
    }

    /// Consecutive address pairs; a route of length L has L - 1 legs.
    pub fn legs(&self) -> impl Iterator<Item = Leg<'_>> {
        self.addresses.windows(2).map(|pair| Leg {
            origin: &pair[0],
            destination: &pair[1],
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LegFailureReason {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("no usable duration")]
    NoDuration,
}

/// The leg that made a candidate's route duration unavailable.
#[derive(Debug, thiserror::Error)]
#[error("leg {leg_index} ({origin} -> {destination}): {reason}")]
pub struct LegFailure {
    pub leg_index: usize,
    pub origin: String,
    pub destination: String,
    pub reason: LegFailureReason,
}

/// Total traffic-aware minutes to drive `route` departing at `departure`.
///
/// Every leg is queried at the same departure timestamp. The first failed leg
/// makes the whole estimate unavailable; partial sums are never returned.
pub fn evaluate_route<O: RoutingOracle>(
    oracle: &O,
    route: &Route,
    departure: DateTime<Utc>,
) -> Result<f64, LegFailure> {
    let mut total_minutes = 0.0;

    for (leg_index, leg) in route.legs().enumerate() {
        let failure = |reason: LegFailureReason| LegFailure {
            leg_index,
            origin: leg.origin.to_string(),
            destination: leg.destination.to_string(),
            reason,
        };

        let estimate = oracle
            .estimate_leg(leg.origin, leg.destination, departure)
            .map_err(|err| failure(err.into()))?;
        let minutes = estimate
            .minutes()
            .ok_or_else(|| failure(LegFailureReason::NoDuration))?;

        debug!(
            origin = leg.origin,
            destination = leg.destination,
            %departure,
            minutes,
            "leg estimate"
        );
        total_minutes += minutes;
    }

    Ok(total_minutes)
}
