//! Candidate departure times for a delivery day.

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};

use crate::error::PlanError;

pub const DEFAULT_FIRST_HOUR: u32 = 8;
pub const DEFAULT_LAST_HOUR: u32 = 18;

/// Window of whole hours (inclusive) in which a departure may be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub first_hour: u32,
    pub last_hour: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            first_hour: DEFAULT_FIRST_HOUR,
            last_hour: DEFAULT_LAST_HOUR,
        }
    }
}

impl BusinessHours {
    pub fn new(first_hour: u32, last_hour: u32) -> Result<Self, PlanError> {
        if first_hour > last_hour || last_hour > 23 {
            return Err(PlanError::InvalidHours {
                first: first_hour,
                last: last_hour,
            });
        }
        Ok(Self {
            first_hour,
            last_hour,
        })
    }
}

/// One hourly departure slot under evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureCandidate {
    /// Local wall-clock label, e.g. "09:00".
    pub label: String,
    pub departure: DateTime<Utc>,
}

/// Hourly departure slots on `date`, in increasing order.
///
/// Future dates start at `hours.first_hour`. Otherwise the first slot is the
/// later of `first_hour` and the hour after `now`, and any slot not strictly
/// after `now` is dropped, so past dates yield nothing. Hours that do not exist
/// locally (DST gaps) are skipped.
pub fn candidate_times<Tz: TimeZone>(
    date: NaiveDate,
    now: &DateTime<Tz>,
    hours: BusinessHours,
) -> Vec<DepartureCandidate> {
    let tz = now.timezone();
    let now_utc = now.with_timezone(&Utc);

    let start_hour = if date > now.date_naive() {
        hours.first_hour
    } else {
        hours.first_hour.max(now.hour() + 1)
    };

    (start_hour..=hours.last_hour)
        .filter_map(|hour| {
            let naive = date.and_hms_opt(hour, 0, 0)?;
            let departure = tz.from_local_datetime(&naive).earliest()?.with_timezone(&Utc);
            if departure <= now_utc {
                return None;
            }
            Some(DepartureCandidate {
                label: format!("{:02}:00", hour),
                departure,
            })
        })
        .collect()
}
