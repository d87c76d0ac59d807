//! Event and recurrence rule types.
//!
//! These types are shared by the recurrence expander, the notification
//! scheduler, the store and both binaries. The payload fields (title,
//! description, color, completed, members) are opaque to the core: they are
//! copied across occurrences and never interpreted.

use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{ANYTIME_HOUR, ANYTIME_MINUTE};
use crate::error::FamPlanError;

/// A scheduled event. All timestamps are naive local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    /// Shared by every occurrence generated from one recurrence request;
    /// equals the first occurrence's own id. None for non-recurring events.
    pub series_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub completed: bool,
    /// Family members attached to this event (opaque to the core).
    pub members: Vec<String>,
}

impl Event {
    pub fn new(
        title: String,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        description: Option<String>,
        color: Option<String>,
        members: Vec<String>,
    ) -> Self {
        Event {
            id: Uuid::new_v4().to_string(),
            series_id: None,
            title,
            description,
            color,
            start_time,
            end_time,
            completed: false,
            members,
        }
    }

    /// Whether this is an "anytime today" pseudo-event, marked by a start
    /// time of 23:58 local. Anytime events are exempt from notification
    /// scheduling.
    pub fn is_anytime(&self) -> bool {
        self.start_time.hour() == ANYTIME_HOUR && self.start_time.minute() == ANYTIME_MINUTE
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Start timestamp marking an "anytime today" pseudo-event on `date`.
pub fn anytime_start(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(ANYTIME_HOUR, ANYTIME_MINUTE, 0).unwrap()
}

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl FromStr for Frequency {
    type Err = FamPlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(FamPlanError::InvalidRule(format!(
                "Unknown frequency '{}'. Expected daily, weekly, biweekly, monthly or yearly",
                other
            ))),
        }
    }
}

/// When a recurring series stops producing occurrences.
/// `None` is bounded only by the expander's safety caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCondition {
    None,
    AfterCount(u32),
    OnDate(NaiveDate),
}

/// A recurrence rule attached to an event-creation request.
/// Not persisted per occurrence; only the expander consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub end: EndCondition,
}
