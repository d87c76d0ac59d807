//! Date range for filtering events.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use crate::constants::DEFAULT_AGENDA_DAYS;

/// Date range for filtering events.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl Default for DateRange {
    /// Default range: ±DEFAULT_AGENDA_DAYS from now
    fn default() -> Self {
        let now = Local::now().naive_local();
        DateRange {
            from: Some(now - Duration::days(DEFAULT_AGENDA_DAYS)),
            to: Some(now + Duration::days(DEFAULT_AGENDA_DAYS)),
        }
    }
}

impl DateRange {
    /// Parse a date string into a DateRange.
    /// - `from`: "start" for unbounded, or YYYY-MM-DD
    /// - `to`: YYYY-MM-DD, defaults to +DEFAULT_AGENDA_DAYS if not specified
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        let now = Local::now().naive_local();

        let from_dt = match from {
            Some("start") => None, // Unbounded past
            Some(s) => Some(parse_date_start(s)?),
            None => Some(now - Duration::days(DEFAULT_AGENDA_DAYS)),
        };

        let to_dt = match to {
            Some(s) => Some(parse_date_end(s)?),
            None => Some(now + Duration::days(DEFAULT_AGENDA_DAYS)),
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    /// Whether a timestamp falls inside the range (inclusive at both ends).
    pub fn contains(&self, t: &NaiveDateTime) -> bool {
        self.from.is_none_or(|from| *t >= from) && self.to.is_none_or(|to| *t <= to)
    }
}

/// Parse YYYY-MM-DD as start of day
fn parse_date_start(s: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap())
}

/// Parse YYYY-MM-DD as end of day
fn parse_date_end(s: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(23, 59, 59).unwrap())
}
