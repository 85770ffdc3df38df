//! Optimal departure selection.

use crate::schedule::DepartureCandidate;

#[derive(Debug, Clone, PartialEq)]
pub struct OptimalDeparture {
    pub candidate: DepartureCandidate,
    /// Unrounded total route duration in minutes.
    pub duration_minutes: f64,
}

impl OptimalDeparture {
    /// Duration rounded to the nearest whole minute, for display.
    pub fn rounded_minutes(&self) -> i64 {
        self.duration_minutes.round() as i64
    }
}

/// Pick the minimum-duration departure from available results.
///
/// Results must be given in candidate order; ties keep the earliest one.
/// Returns `None` when there is nothing to choose from.
pub fn select_optimal<'a, I>(results: I) -> Option<OptimalDeparture>
where
    I: IntoIterator<Item = (&'a DepartureCandidate, f64)>,
{
    let mut best: Option<(&DepartureCandidate, f64)> = None;

    for (candidate, minutes) in results {
        match best {
            Some((_, best_minutes)) if minutes >= best_minutes => {}
            _ => best = Some((candidate, minutes)),
        }
    }

    best.map(|(candidate, duration_minutes)| OptimalDeparture {
        candidate: candidate.clone(),
        duration_minutes,
    })
}
