//! JSON event store.
//!
//! One JSON document holding every event row, shared by famplan-cli
//! (writes) and famplan-notify (reads). Writes are all-or-nothing via a
//! temp file + rename; reads deserialize row by row so one malformed row
//! never takes down the whole feed.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::date_range::DateRange;
use crate::error::{FamPlanError, FamPlanResult};
use crate::event::Event;

pub struct EventStore {
    path: PathBuf,
}

impl EventStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        EventStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every readable event row. A missing file is an empty store;
    /// a row that fails to deserialize is skipped with a warning.
    pub fn events(&self) -> FamPlanResult<Vec<Event>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let rows: Vec<serde_json::Value> = serde_json::from_str(&content).map_err(|e| {
            FamPlanError::Store(format!(
                "{} is not a JSON array of events: {}",
                self.path.display(),
                e
            ))
        })?;

        let events = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<Event>(row) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("skipping malformed event row: {}", e);
                    None
                }
            })
            .collect();

        Ok(events)
    }

    /// Append rows and persist. All-or-nothing: a failed write leaves the
    /// previous document in place.
    pub fn insert_events(&self, new_events: &[Event]) -> FamPlanResult<()> {
        let mut events = self.events()?;
        events.extend(new_events.iter().cloned());
        self.write(&events)
    }

    /// Events whose start time falls inside `range`, sorted by start time.
    pub fn query_range(&self, range: &DateRange) -> FamPlanResult<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events()?
            .into_iter()
            .filter(|e| range.contains(&e.start_time))
            .collect();
        events.sort_by_key(|e| e.start_time);
        Ok(events)
    }

    fn write(&self, events: &[Event]) -> FamPlanResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(events)
            .map_err(|e| FamPlanError::Store(e.to_string()))?;

        let temp = self.path.with_extension("tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_event(title: &str, y: i32, m: u32, d: u32, hour: u32) -> Event {
        let start = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Event::new(
            title.to_string(),
            start,
            start + chrono::Duration::hours(1),
            None,
            None,
            vec![],
        )
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::open(dir.path().join("events.json"));
        assert!(store.events().unwrap().is_empty());
    }

    #[test]
    fn test_insert_then_query_range() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::open(dir.path().join("events.json"));

        store
            .insert_events(&[
                make_event("July", 2026, 7, 10, 9),
                make_event("August late", 2026, 8, 20, 9),
                make_event("August early", 2026, 8, 5, 9),
            ])
            .unwrap();

        let range = DateRange::from_args(Some("2026-08-01"), Some("2026-08-31")).unwrap();
        let events = store.query_range(&range).unwrap();

        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["August early", "August late"]);
    }

    #[test]
    fn test_inserts_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::open(dir.path().join("events.json"));

        store.insert_events(&[make_event("one", 2026, 8, 1, 9)]).unwrap();
        store.insert_events(&[make_event("two", 2026, 8, 2, 9)]).unwrap();

        assert_eq!(store.events().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");

        let good = serde_json::to_value(make_event("good", 2026, 8, 5, 9)).unwrap();
        let bad = serde_json::json!({ "id": "bad", "start_time": "not-a-timestamp" });
        std::fs::write(&path, serde_json::to_string(&vec![bad, good]).unwrap()).unwrap();

        let store = EventStore::open(path);
        let events = store.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "good");
    }

    #[test]
    fn test_non_array_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, "{\"events\": []}").unwrap();

        let store = EventStore::open(path);
        assert!(matches!(store.events(), Err(FamPlanError::Store(_))));
    }
}
