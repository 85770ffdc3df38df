//! Plain-text rendering of a departure plan.

use std::fmt::Write;

use crate::planner::DeparturePlan;

const BAR_WIDTH: f64 = 40.0;

/// Render the outcome, any order warning, the duration curve and the stop order.
pub fn render_plan(plan: &DeparturePlan) -> String {
    let mut out = String::new();

    match &plan.optimal {
        Some(optimal) => {
            let _ = writeln!(
                out,
                "Optimal departure time: {} ({} minutes)",
                optimal.candidate.label,
                optimal.rounded_minutes()
            );
        }
        None if !plan.has_candidates() => {
            let _ = writeln!(out, "Error: No departure slots remain on {}", plan.date);
        }
        None => {
            let _ = writeln!(out, "Error: No valid durations from API");
        }
    }

    if let Some(warning) = &plan.order_warning {
        let _ = writeln!(out, "Warning: {}; stops visited in the order entered", warning);
    }

    if plan.has_candidates() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Estimated delivery duration vs departure time:");
        let longest = plan
            .curve
            .iter()
            .filter_map(|point| point.minutes())
            .fold(0.0_f64, f64::max);

        for point in &plan.curve {
            match point.minutes() {
                Some(minutes) => {
                    let width = if longest > 0.0 {
                        (minutes / longest * BAR_WIDTH).round() as usize
                    } else {
                        0
                    };
                    let _ = writeln!(
                        out,
                        "  {}  {:>6.1} min  {}",
                        point.candidate.label,
                        minutes,
                        "#".repeat(width)
                    );
                }
                None => {
                    let _ = writeln!(out, "  {}  unavailable", point.candidate.label);
                }
            }
        }
    }

    let addresses = plan.route.addresses();
    let _ = writeln!(out);
    let _ = writeln!(out, "Route:");
    for (position, address) in addresses.iter().enumerate() {
        if position == 0 || position == addresses.len() - 1 {
            let _ = writeln!(out, "  -  {} (depot)", address);
        } else {
            let _ = writeln!(out, "  {}. {}", position, address);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use crate::legs::{LegFailure, LegFailureReason, Route};
    use crate::order::OrderWarning;
    use crate::planner::CurvePoint;
    use crate::schedule::DepartureCandidate;
    use crate::selector::OptimalDeparture;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn candidate(hour: u32) -> DepartureCandidate {
        DepartureCandidate {
            label: format!("{:02}:00", hour),
            departure: Utc.with_ymd_and_hms(2026, 10, 17, hour, 0, 0).unwrap(),
        }
    }

    fn plan(curve: Vec<CurvePoint>, optimal: Option<OptimalDeparture>) -> DeparturePlan {
        DeparturePlan {
            date: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            optimal,
            curve,
            route: Route::closed_loop("W", &["B".to_string(), "A".to_string()]),
            order_warning: None,
        }
    }

    #[test]
    fn test_renders_optimal_curve_and_route() {
        let curve = vec![
            CurvePoint { candidate: candidate(9), duration: Ok(23.0) },
            CurvePoint {
                candidate: candidate(10),
                duration: Err(LegFailure {
                    leg_index: 1,
                    origin: "B".to_string(),
                    destination: "A".to_string(),
                    reason: LegFailureReason::NoDuration,
                }),
            },
        ];
        let optimal = OptimalDeparture { candidate: candidate(9), duration_minutes: 23.0 };
        let text = render_plan(&plan(curve, Some(optimal)));

        assert!(text.contains("Optimal departure time: 09:00 (23 minutes)"));
        assert!(text.contains("10:00  unavailable"));
        assert!(text.contains("1. B"));
        assert!(text.contains("2. A"));
        assert!(text.contains("W (depot)"));
    }

    #[test]
    fn test_renders_no_valid_durations() {
        let curve = vec![CurvePoint {
            candidate: candidate(9),
            duration: Err(LegFailure {
                leg_index: 0,
                origin: "W".to_string(),
                destination: "B".to_string(),
                reason: LegFailureReason::Oracle(OracleError::NoRoute),
            }),
        }];
        let text = render_plan(&plan(curve, None));
        assert!(text.starts_with("Error: No valid durations from API"));
    }

    #[test]
    fn test_renders_no_slots() {
        let text = render_plan(&plan(Vec::new(), None));
        assert!(text.starts_with("Error: No departure slots remain on 2026-10-17"));
        assert!(!text.contains("duration vs departure"));
    }

    #[test]
    fn test_renders_order_warning() {
        let mut plan = plan(Vec::new(), None);
        plan.order_warning = Some(OrderWarning::MissingPermutation);
        let text = render_plan(&plan);
        assert!(text.contains("Warning: route order optimization returned no waypoint order"));
    }
}
