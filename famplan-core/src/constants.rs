//! Shared tunables for the famplan core.

/// Hard cap on occurrences generated for one recurrence request.
pub const MAX_SERIES_OCCURRENCES: usize = 500;

/// Hard horizon for generated occurrences, in months past the seed's start.
pub const MAX_SERIES_HORIZON_MONTHS: u32 = 24;

/// Minutes before an event's start at which its notification becomes due.
pub const NOTIFY_LEAD_MINUTES: i64 = 10;

/// Cadence of due-signal evaluation ticks, in seconds.
pub const EVAL_INTERVAL_SECS: u64 = 30;

/// Cadence of stale-state cleanup ticks, in seconds.
pub const CLEANUP_INTERVAL_SECS: u64 = 300;

/// Cadence of event store reloads in the watcher, in seconds.
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Default agenda window: this many days either side of now.
pub const DEFAULT_AGENDA_DAYS: i64 = 14;

/// Local start time marking an "anytime today" pseudo-event.
pub const ANYTIME_HOUR: u32 = 23;
pub const ANYTIME_MINUTE: u32 = 58;
