//! Upcoming-event notification scheduling.
//!
//! The scheduler owns the per-session "already announced" state and decides,
//! on each evaluation tick, which events just entered the lead window before
//! their start. It has no timers and no clock of its own: the host drives it
//! with `poll_due` on a fast cadence and `purge_expired` on a slow one,
//! passing `now` explicitly, which also makes it testable without waiting
//! on wall-clock time.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::constants::NOTIFY_LEAD_MINUTES;
use crate::event::Event;

/// Per-session due-signal state for upcoming events.
///
/// An event id is recorded the instant its due-signal is emitted and is
/// never announced again while present. The recorded value is the event's
/// start time, which doubles as the entry's safe-to-purge timestamp: once
/// the start has passed the entry only costs memory, so the cleanup tick
/// drops it.
pub struct NotificationScheduler {
    lead: Duration,
    fired: HashMap<String, NaiveDateTime>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::with_lead(Duration::minutes(NOTIFY_LEAD_MINUTES))
    }

    pub fn with_lead(lead: Duration) -> Self {
        NotificationScheduler {
            lead,
            fired: HashMap::new(),
        }
    }

    /// Evaluation tick: return every event that just entered the lead
    /// window, in input order, at most once per id per session.
    ///
    /// An event qualifies when `0 < start_time - now <= lead`. Events whose
    /// start has already passed never fire, whenever they are first seen:
    /// the scheduler announces events discovered before they start, not
    /// retroactively. "Anytime today" pseudo-events are skipped entirely.
    pub fn poll_due(&mut self, events: &[Event], now: NaiveDateTime) -> Vec<Event> {
        let mut due = Vec::new();

        for event in events {
            if event.is_anytime() || self.fired.contains_key(&event.id) {
                continue;
            }

            let until_start = event.start_time - now;
            if until_start > Duration::zero() && until_start <= self.lead {
                debug!(id = %event.id, title = %event.title, "due-signal emitted");
                self.fired.insert(event.id.clone(), event.start_time);
                due.push(event.clone());
            }
        }

        due
    }

    /// Cleanup tick: forget fired entries whose event has already started.
    ///
    /// Purging is a memory bound, not a re-arm: ids are unique, so a purged
    /// id only becomes eligible again if a new event reuses it.
    pub fn purge_expired(&mut self, now: NaiveDateTime) {
        let before = self.fired.len();
        self.fired.retain(|_, start| *start >= now);

        let purged = before - self.fired.len();
        if purged > 0 {
            debug!(purged, retained = self.fired.len(), "purged expired notification state");
        }
    }

    /// Whether a due-signal has already been emitted for this id.
    pub fn has_fired(&self, id: &str) -> bool {
        self.fired.contains_key(id)
    }
}

impl Default for NotificationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::anytime_start;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 5)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn make_event(id: &str, start: NaiveDateTime) -> Event {
        Event {
            id: id.to_string(),
            series_id: None,
            title: format!("Event {}", id),
            description: None,
            color: None,
            start_time: start,
            end_time: start + Duration::minutes(30),
            completed: false,
            members: vec![],
        }
    }

    #[test]
    fn test_fires_once_inside_window() {
        let mut scheduler = NotificationScheduler::new();
        let events = vec![make_event("e1", at(12, 5))];

        // 5 minutes out: inside the 10-minute window.
        let due = scheduler.poll_due(&events, at(12, 0));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "e1");

        // Any number of further in-window ticks stay silent.
        assert!(scheduler.poll_due(&events, at(12, 1)).is_empty());
        assert!(scheduler.poll_due(&events, at(12, 4)).is_empty());
        assert!(scheduler.has_fired("e1"));
    }

    #[test]
    fn test_does_not_fire_outside_window() {
        let mut scheduler = NotificationScheduler::new();
        let events = vec![make_event("e1", at(13, 0))];

        // 30 minutes out: too early.
        assert!(scheduler.poll_due(&events, at(12, 30)).is_empty());
        // Window reached later.
        assert_eq!(scheduler.poll_due(&events, at(12, 51)).len(), 1);
    }

    #[test]
    fn test_no_retroactive_fire() {
        let mut scheduler = NotificationScheduler::new();
        let events = vec![make_event("e1", at(9, 0))];

        // First seen after its start: never announced.
        assert!(scheduler.poll_due(&events, at(9, 1)).is_empty());
        assert!(scheduler.poll_due(&events, at(10, 0)).is_empty());
        assert!(!scheduler.has_fired("e1"));
    }

    #[test]
    fn test_start_instant_is_not_in_window() {
        let mut scheduler = NotificationScheduler::new();
        let events = vec![make_event("e1", at(9, 0))];

        // Exactly at start: 0 < start - now fails.
        assert!(scheduler.poll_due(&events, at(9, 0)).is_empty());
    }

    #[test]
    fn test_multiple_eligible_events_all_fire_in_input_order() {
        let mut scheduler = NotificationScheduler::new();
        let events = vec![
            make_event("e1", at(12, 8)),
            make_event("e2", at(12, 5)),
            make_event("e3", at(14, 0)),
        ];

        let due = scheduler.poll_due(&events, at(12, 0));
        let ids: Vec<_> = due.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
    }

    #[test]
    fn test_anytime_events_never_fire() {
        let mut scheduler = NotificationScheduler::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let start = anytime_start(date);
        let events = vec![make_event("anytime", start)];

        // Five minutes before the 23:58 marker, squarely inside the window.
        assert!(scheduler.poll_due(&events, start - Duration::minutes(5)).is_empty());
    }

    #[test]
    fn test_cleanup_purges_started_events() {
        let mut scheduler = NotificationScheduler::new();
        let events = vec![make_event("e1", at(12, 5))];

        assert_eq!(scheduler.poll_due(&events, at(12, 0)).len(), 1);

        // Cleanup before the start keeps the entry.
        scheduler.purge_expired(at(12, 4));
        assert!(scheduler.has_fired("e1"));

        // Cleanup after the start drops it.
        scheduler.purge_expired(at(12, 6));
        assert!(!scheduler.has_fired("e1"));

        // A new event reusing the id is unseen again.
        let reused = vec![make_event("e1", at(16, 0))];
        assert_eq!(scheduler.poll_due(&reused, at(15, 55)).len(), 1);
    }

    #[test]
    fn test_custom_lead_window() {
        let mut scheduler = NotificationScheduler::with_lead(Duration::minutes(60));
        let events = vec![make_event("e1", at(13, 0))];

        assert_eq!(scheduler.poll_due(&events, at(12, 30)).len(), 1);
    }

    #[test]
    fn test_end_to_end_fire_then_purge() {
        // events=[e1 at now+5min], tick -> due; tick again -> silent;
        // e1 starts, cleanup -> purged.
        let mut scheduler = NotificationScheduler::new();
        let now = at(12, 0);
        let events = vec![make_event("e1", now + Duration::minutes(5))];

        assert_eq!(scheduler.poll_due(&events, now).len(), 1);
        assert!(scheduler.poll_due(&events, now).is_empty());

        scheduler.purge_expired(now + Duration::minutes(6));
        assert!(!scheduler.has_fired("e1"));
    }
}
