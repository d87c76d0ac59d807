//! Recurrence expansion for repeating events.
//!
//! Expands one seed event plus a rule into the ordered series of concrete
//! occurrences to persist. The expansion is pure: it allocates ids and
//! advances timestamps but never touches the store.

use chrono::{Duration, Months, NaiveDateTime};
use uuid::Uuid;

use crate::constants::{MAX_SERIES_HORIZON_MONTHS, MAX_SERIES_OCCURRENCES};
use crate::error::{FamPlanError, FamPlanResult};
use crate::event::{EndCondition, Event, Frequency, RecurrenceRule};

/// The result of expanding one recurrence request.
///
/// `truncated` is set when a safety cap (occurrence count or horizon) cut
/// the series short before the rule's own end condition. That is a
/// reportable condition for the caller, not an error.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub events: Vec<Event>,
    pub truncated: bool,
}

/// Expand `seed` into its full series under `rule`.
///
/// Occurrence #1 is the seed itself; occurrence #k advances the seed's
/// start by (k-1) periods, keeping time of day, duration and the whole
/// payload. Every occurrence carries `series_id` equal to the seed's id.
///
/// All-or-nothing: an invalid request returns an error before any
/// occurrence is generated.
pub fn expand_series(seed: &Event, rule: &RecurrenceRule) -> FamPlanResult<Expansion> {
    if seed.end_time < seed.start_time {
        return Err(FamPlanError::InvalidRule(format!(
            "Event '{}' ends before it starts",
            seed.title
        )));
    }
    if rule.end == EndCondition::AfterCount(0) {
        return Err(FamPlanError::InvalidRule(
            "Occurrence count must be at least 1".to_string(),
        ));
    }

    let duration = seed.duration();
    let horizon = seed
        .start_time
        .checked_add_months(Months::new(MAX_SERIES_HORIZON_MONTHS))
        .ok_or_else(|| {
            FamPlanError::InvalidRule("Start time is out of calendar range".to_string())
        })?;

    let mut events: Vec<Event> = Vec::new();
    let mut truncated = false;

    for k in 0u32.. {
        let Some(start) = occurrence_start(seed.start_time, rule.frequency, k) else {
            truncated = true;
            break;
        };

        // The rule's own end condition. The seed itself (k = 0) is always
        // included, whatever the end condition says.
        match rule.end {
            EndCondition::AfterCount(n) if k >= n => break,
            EndCondition::OnDate(d) if k > 0 && start.date() > d => break,
            _ => {}
        }

        // Safety caps: a runaway rule must never produce unbounded writes.
        if events.len() >= MAX_SERIES_OCCURRENCES || (k > 0 && start > horizon) {
            truncated = true;
            break;
        }

        let id = if k == 0 {
            seed.id.clone()
        } else {
            Uuid::new_v4().to_string()
        };
        events.push(Event {
            id,
            series_id: Some(seed.id.clone()),
            title: seed.title.clone(),
            description: seed.description.clone(),
            color: seed.color.clone(),
            start_time: start,
            end_time: start + duration,
            completed: seed.completed,
            members: seed.members.clone(),
        });
    }

    Ok(Expansion { events, truncated })
}

/// Start of occurrence #(k+1): the seed's start advanced by k periods.
///
/// Month-based frequencies advance from the seed every time rather than
/// stepping occurrence-to-occurrence, so a Jan 31 monthly seed clamps to
/// Feb 28/29 and still lands back on Mar 31. `Months` addition clamps to
/// the last valid day of the target month.
fn occurrence_start(seed: NaiveDateTime, frequency: Frequency, k: u32) -> Option<NaiveDateTime> {
    match frequency {
        Frequency::Daily => seed.checked_add_signed(Duration::days(i64::from(k))),
        Frequency::Weekly => seed.checked_add_signed(Duration::days(7 * i64::from(k))),
        Frequency::Biweekly => seed.checked_add_signed(Duration::days(14 * i64::from(k))),
        Frequency::Monthly => seed.checked_add_months(Months::new(k)),
        Frequency::Yearly => seed.checked_add_months(Months::new(12 * k)),
    }
}
