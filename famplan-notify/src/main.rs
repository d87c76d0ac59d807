//! Long-running watcher that surfaces upcoming famplan events as desktop
//! notifications.
//!
//! Three independent cadences drive one single-threaded loop: a refresh
//! tick reloads the event store, a fast evaluation tick asks the scheduler
//! which events just entered their lead window, and a slow cleanup tick
//! lets the scheduler forget events that have already started. Because all
//! three arms run on the same task, the scheduler needs no locking.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Duration, Local};
use clap::Parser;
use famplan_core::constants::{
    CLEANUP_INTERVAL_SECS, EVAL_INTERVAL_SECS, NOTIFY_LEAD_MINUTES, REFRESH_INTERVAL_SECS,
};
use famplan_core::event::Event;
use famplan_core::notify::NotificationScheduler;
use famplan_core::store::EventStore;
use notify_rust::Notification;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "famplan-notify")]
#[command(about = "Watch the famplan event store and announce events about to start")]
struct Cli {
    /// Path to the event store (defaults to the user data directory)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Minutes before an event's start at which its notification fires
    #[arg(long, default_value_t = NOTIFY_LEAD_MINUTES)]
    lead_minutes: i64,

    /// Seconds between due-signal evaluation ticks
    #[arg(long, default_value_t = EVAL_INTERVAL_SECS)]
    eval_secs: u64,

    /// Seconds between stale-state cleanup ticks
    #[arg(long, default_value_t = CLEANUP_INTERVAL_SECS)]
    cleanup_secs: u64,

    /// Seconds between event store reloads
    #[arg(long, default_value_t = REFRESH_INTERVAL_SECS)]
    refresh_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("famplan_notify=info,famplan_core=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = EventStore::open(resolve_store_path(cli.store)?);
    let mut scheduler = NotificationScheduler::with_lead(Duration::minutes(cli.lead_minutes));

    let mut events = store.events()?;
    info!(
        count = events.len(),
        "watching event store at {}",
        store.path().display()
    );

    let mut refresh_tick = interval(std::time::Duration::from_secs(cli.refresh_secs));
    let mut eval_tick = interval(std::time::Duration::from_secs(cli.eval_secs));
    let mut cleanup_tick = interval(std::time::Duration::from_secs(cli.cleanup_secs));

    // Cadence is best-effort: a busy host skips ticks instead of bursting.
    refresh_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    eval_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    cleanup_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = refresh_tick.tick() => {
                match store.events() {
                    Ok(fresh) => events = fresh,
                    Err(e) => warn!("could not reload event store: {}", e),
                }
            }
            _ = eval_tick.tick() => {
                let now = Local::now().naive_local();
                for event in scheduler.poll_due(&events, now) {
                    announce(&event);
                }
            }
            _ = cleanup_tick.tick() => {
                scheduler.purge_expired(Local::now().naive_local());
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Show one desktop notification for a due event. A failed delivery is a
/// missed alert, never a dead watcher.
fn announce(event: &Event) {
    info!(title = %event.title, start = %event.start_time, "event starting soon");

    let mut body = format!("Starts at {}", event.start_time.format("%H:%M"));
    if let Some(description) = &event.description {
        body.push('\n');
        body.push_str(description);
    }

    if let Err(e) = Notification::new()
        .summary(&format!("Starting soon: {}", event.title))
        .body(&body)
        .show()
    {
        warn!("could not show desktop notification: {}", e);
    }
}

fn resolve_store_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p),
        None => {
            let base = dirs::data_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine the user data directory"))?;
            Ok(base.join("famplan").join("events.json"))
        }
    }
}
