//! Routing oracle interface consumed by the planner.
//!
//! The oracle is an external traffic-aware routing service. The planner only
//! needs two shapes of query from it; concrete adapters (and test fakes)
//! implement this trait and are handed to `planner::optimize` explicitly.

use chrono::{DateTime, Utc};

use crate::error::OracleError;

/// Visit order returned by a multi-stop "optimize order" request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaypointOrder {
    /// Permutation of stop indices, `None` if the oracle left the field out.
    pub waypoint_order: Option<Vec<usize>>,
}

impl WaypointOrder {
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            waypoint_order: Some(order),
        }
    }
}

/// Duration estimate for a single origin -> destination leg.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegEstimate {
    /// Free-flow duration in seconds.
    pub duration_seconds: Option<f64>,
    /// Traffic-conditioned duration in seconds.
    pub duration_in_traffic_seconds: Option<f64>,
}

impl LegEstimate {
    pub fn new(duration_seconds: f64, duration_in_traffic_seconds: Option<f64>) -> Self {
        Self {
            duration_seconds: Some(duration_seconds),
            duration_in_traffic_seconds,
        }
    }

    /// Usable duration in minutes.
    ///
    /// Traffic-conditioned duration wins over the free-flow one. Returns `None`
    /// when neither is present or the chosen value is negative or not finite.
    pub fn minutes(&self) -> Option<f64> {
        let seconds = self
            .duration_in_traffic_seconds
            .or(self.duration_seconds)?;

        if seconds.is_finite() && seconds >= 0.0 {
            Some(seconds / 60.0)
        } else {
            None
        }
    }
}

/// Traffic-aware routing service.
///
/// Calls are blocking. Implementations must be shareable across threads since
/// candidate departure times may be evaluated in parallel.
pub trait RoutingOracle: Sync {
    /// Ask for an optimized visiting order of `stops` on a depot round trip.
    ///
    /// No departure time is attached; order is treated as traffic-independent.
    fn resolve_order(&self, depot: &str, stops: &[String]) -> Result<WaypointOrder, OracleError>;

    /// Estimate one leg departing at `departure` using a best-guess traffic model.
    fn estimate_leg(
        &self,
        origin: &str,
        destination: &str,
        departure: DateTime<Utc>,
    ) -> Result<LegEstimate, OracleError>;
}
