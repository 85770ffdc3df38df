//! departure-planner core
//!
//! Picks a visiting order for a handful of delivery stops and the departure
//! hour that minimizes traffic-aware driving time around a depot loop.

pub mod traits;
pub mod error;
pub mod schedule;
pub mod order;
pub mod legs;
pub mod selector;
pub mod planner;
pub mod google;
pub mod config;
pub mod report;
