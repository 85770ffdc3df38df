//! Test fixtures for departure-planner.
//!
//! Provides a scripted in-memory routing oracle that records every call.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};

use departure_planner::error::OracleError;
use departure_planner::traits::{LegEstimate, RoutingOracle, WaypointOrder};

#[derive(Debug, Clone)]
enum OrderReply {
    Order(Vec<usize>),
    Missing,
    Fail,
}

#[derive(Debug, Clone, Copy)]
enum LegReply {
    Estimate(LegEstimate),
    Fail,
}

/// Builder-style fake oracle keyed by (origin, destination, departure hour).
#[derive(Debug)]
pub struct FakeOracle {
    order: OrderReply,
    legs: HashMap<(String, String, Option<u32>), LegReply>,
    order_calls: AtomicUsize,
    leg_calls: Mutex<Vec<(String, String, DateTime<Utc>)>>,
}

impl FakeOracle {
    /// Oracle that keeps the input order and knows no legs.
    pub fn new() -> Self {
        Self {
            order: OrderReply::Missing,
            legs: HashMap::new(),
            order_calls: AtomicUsize::new(0),
            leg_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn order(mut self, order: &[usize]) -> Self {
        self.order = OrderReply::Order(order.to_vec());
        self
    }

    pub fn missing_order(mut self) -> Self {
        self.order = OrderReply::Missing;
        self
    }

    pub fn failing_order(mut self) -> Self {
        self.order = OrderReply::Fail;
        self
    }

    /// Traffic-aware duration for a leg at every hour.
    pub fn leg(self, origin: &str, destination: &str, minutes: f64) -> Self {
        self.reply(origin, destination, None, LegReply::Estimate(traffic(minutes)))
    }

    /// Traffic-aware duration for a leg departing at `hour` (UTC).
    pub fn leg_at(self, hour: u32, origin: &str, destination: &str, minutes: f64) -> Self {
        self.reply(origin, destination, Some(hour), LegReply::Estimate(traffic(minutes)))
    }

    /// Free-flow duration only, no traffic estimate.
    pub fn free_flow_leg(self, origin: &str, destination: &str, minutes: f64) -> Self {
        let estimate = LegEstimate::new(minutes * 60.0, None);
        self.reply(origin, destination, None, LegReply::Estimate(estimate))
    }

    /// Leg answered without any duration.
    pub fn empty_leg_at(self, hour: u32, origin: &str, destination: &str) -> Self {
        self.reply(origin, destination, Some(hour), LegReply::Estimate(LegEstimate::default()))
    }

    pub fn failing_leg_at(self, hour: u32, origin: &str, destination: &str) -> Self {
        self.reply(origin, destination, Some(hour), LegReply::Fail)
    }

    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    pub fn leg_calls(&self) -> Vec<(String, String, DateTime<Utc>)> {
        self.leg_calls.lock().unwrap().clone()
    }

    fn reply(mut self, origin: &str, destination: &str, hour: Option<u32>, reply: LegReply) -> Self {
        self.legs
            .insert((origin.to_string(), destination.to_string(), hour), reply);
        self
    }
}

fn traffic(minutes: f64) -> LegEstimate {
    LegEstimate {
        duration_seconds: Some(minutes * 60.0 * 0.8),
        duration_in_traffic_seconds: Some(minutes * 60.0),
    }
}

fn service_error() -> OracleError {
    OracleError::Api {
        status: "UNKNOWN_ERROR".to_string(),
        message: "scripted failure".to_string(),
    }
}

impl RoutingOracle for FakeOracle {
    fn resolve_order(&self, _depot: &str, _stops: &[String]) -> Result<WaypointOrder, OracleError> {
        self.order_calls.fetch_add(1, Ordering::SeqCst);
        match &self.order {
            OrderReply::Order(order) => Ok(WaypointOrder::new(order.clone())),
            OrderReply::Missing => Ok(WaypointOrder::default()),
            OrderReply::Fail => Err(service_error()),
        }
    }

    fn estimate_leg(
        &self,
        origin: &str,
        destination: &str,
        departure: DateTime<Utc>,
    ) -> Result<LegEstimate, OracleError> {
        self.leg_calls
            .lock()
            .unwrap()
            .push((origin.to_string(), destination.to_string(), departure));

        let at_hour = (origin.to_string(), destination.to_string(), Some(departure.hour()));
        let any_hour = (origin.to_string(), destination.to_string(), None);
        match self.legs.get(&at_hour).or_else(|| self.legs.get(&any_hour)) {
            Some(LegReply::Estimate(estimate)) => Ok(*estimate),
            Some(LegReply::Fail) => Err(service_error()),
            None => Err(OracleError::NoRoute),
        }
    }
}

pub fn addresses(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Delivery day used across tests; always after `early_now()`.
pub fn delivery_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
}

pub fn early_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap()
}
