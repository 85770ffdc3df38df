//! Route order resolution.
//!
//! The oracle is asked once per plan for an optimized visiting order. Any
//! failure degrades to the input order with a warning instead of aborting.

use tracing::{debug, warn};

use crate::error::OracleError;
use crate::traits::RoutingOracle;

/// Why the input order was kept instead of an optimized one.
#[derive(Debug, thiserror::Error)]
pub enum OrderWarning {
    #[error("route order optimization failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("route order optimization returned no waypoint order")]
    MissingPermutation,

    #[error("route order optimization returned an invalid waypoint order {0:?}")]
    MalformedPermutation(Vec<usize>),
}

#[derive(Debug)]
pub struct ResolvedOrder {
    /// Stops in visiting order.
    pub stops: Vec<String>,
    /// Set when `stops` is the unchanged input order because resolution failed.
    pub warning: Option<OrderWarning>,
}

impl ResolvedOrder {
    fn fallback(stops: &[String], warning: OrderWarning) -> Self {
        warn!(%warning, "keeping input stop order");
        Self {
            stops: stops.to_vec(),
            warning: Some(warning),
        }
    }
}

/// Resolve the visiting order of `stops` on a depot round trip.
pub fn resolve_order<O: RoutingOracle>(oracle: &O, depot: &str, stops: &[String]) -> ResolvedOrder {
    let order = match oracle.resolve_order(depot, stops) {
        Ok(response) => response.waypoint_order,
        Err(err) => return ResolvedOrder::fallback(stops, err.into()),
    };

    let Some(order) = order else {
        return ResolvedOrder::fallback(stops, OrderWarning::MissingPermutation);
    };

    match apply_permutation(stops, &order) {
        Some(resolved) => {
            debug!(?order, "resolved stop order");
            ResolvedOrder {
                stops: resolved,
                warning: None,
            }
        }
        None => ResolvedOrder::fallback(stops, OrderWarning::MalformedPermutation(order)),
    }
}

/// Reorder `stops` so that position `i` holds `stops[order[i]]`.
///
/// Returns `None` unless `order` is a bijection on `0..stops.len()`.
fn apply_permutation(stops: &[String], order: &[usize]) -> Option<Vec<String>> {
    if order.len() != stops.len() {
        return None;
    }

    let mut seen = vec![false; stops.len()];
    for &index in order {
        if index >= stops.len() || seen[index] {
            return None;
        }
        seen[index] = true;
    }

    Some(order.iter().map(|&index| stops[index].clone()).collect())
}
