//! Route and departure time planning.
//!
//! Order is resolved once per plan (it does not depend on departure time in
//! the oracle's model), then the resulting closed loop is re-driven leg by leg
//! at every candidate departure hour. The order is therefore not guaranteed to
//! be the best one for the chosen hour, only for free-flow conditions.

use chrono::{DateTime, NaiveDate, TimeZone};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::PlanError;
use crate::legs::{LegFailure, Route, evaluate_route};
use crate::order::{OrderWarning, resolve_order};
use crate::schedule::{BusinessHours, DepartureCandidate, candidate_times};
use crate::selector::{OptimalDeparture, select_optimal};
use crate::traits::RoutingOracle;

/// Largest number of delivery stops accepted in one plan.
pub const MAX_STOPS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub depot: String,
    /// Stops in input order.
    pub stops: Vec<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub hours: BusinessHours,
    /// Evaluate candidate departures on the rayon pool instead of one by one.
    pub parallel: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            hours: BusinessHours::default(),
            parallel: true,
        }
    }
}

/// Route duration at one candidate departure, or the leg that prevented it.
#[derive(Debug)]
pub struct CurvePoint {
    pub candidate: DepartureCandidate,
    pub duration: Result<f64, LegFailure>,
}

impl CurvePoint {
    pub fn minutes(&self) -> Option<f64> {
        self.duration.as_ref().ok().copied()
    }
}

#[derive(Debug)]
pub struct DeparturePlan {
    pub date: NaiveDate,
    /// `None` when no candidate produced a usable duration.
    pub optimal: Option<OptimalDeparture>,
    /// One point per candidate, in departure order.
    pub curve: Vec<CurvePoint>,
    pub route: Route,
    pub order_warning: Option<OrderWarning>,
}

impl DeparturePlan {
    pub fn resolved_order(&self) -> &[String] {
        self.route.stops()
    }

    pub fn has_candidates(&self) -> bool {
        !self.curve.is_empty()
    }
}

/// Plan the stop order and best departure hour for `request`.
///
/// Only malformed input is an error. Oracle failures degrade the plan: a
/// failed order lookup keeps the input order, a failed leg marks its candidate
/// unavailable, and if every candidate is unavailable `optimal` is `None`.
pub fn optimize<O, Tz>(
    oracle: &O,
    request: &PlanRequest,
    now: &DateTime<Tz>,
    options: &PlanOptions,
) -> Result<DeparturePlan, PlanError>
where
    O: RoutingOracle,
    Tz: TimeZone,
{
    validate(request)?;

    let candidates = candidate_times(request.date, now, options.hours);
    debug!(
        date = %request.date,
        candidates = candidates.len(),
        stops = request.stops.len(),
        "planning departure"
    );

    let resolved = resolve_order(oracle, &request.depot, &request.stops);
    let route = Route::closed_loop(&request.depot, &resolved.stops);

    let durations: Vec<Result<f64, LegFailure>> = if options.parallel {
        candidates
            .par_iter()
            .map(|candidate| evaluate_route(oracle, &route, candidate.departure))
            .collect()
    } else {
        candidates
            .iter()
            .map(|candidate| evaluate_route(oracle, &route, candidate.departure))
            .collect()
    };

    let curve: Vec<CurvePoint> = candidates
        .into_iter()
        .zip(durations)
        .map(|(candidate, duration)| {
            if let Err(failure) = &duration {
                warn!(departure = %candidate.label, %failure, "route duration unavailable");
            }
            CurvePoint {
                candidate,
                duration,
            }
        })
        .collect();

    let optimal = select_optimal(
        curve
            .iter()
            .filter_map(|point| point.minutes().map(|minutes| (&point.candidate, minutes))),
    );

    match &optimal {
        Some(optimal) => info!(
            departure = %optimal.candidate.label,
            minutes = optimal.duration_minutes,
            "optimal departure"
        ),
        None => warn!(date = %request.date, "no valid durations"),
    }

    Ok(DeparturePlan {
        date: request.date,
        optimal,
        curve,
        route,
        order_warning: resolved.warning,
    })
}

fn validate(request: &PlanRequest) -> Result<(), PlanError> {
    if request.depot.trim().is_empty() {
        return Err(PlanError::BlankDepot);
    }
    if request.stops.is_empty() {
        return Err(PlanError::NoStops);
    }
    if request.stops.len() > MAX_STOPS {
        return Err(PlanError::TooManyStops {
            count: request.stops.len(),
            max: MAX_STOPS,
        });
    }
    if let Some(index) = request.stops.iter().position(|stop| stop.trim().is_empty()) {
        return Err(PlanError::BlankAddress { position: index + 1 });
    }
    Ok(())
}
