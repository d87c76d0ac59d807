use anyhow::Result;
use famplan_core::date_range::DateRange;
use famplan_core::store::EventStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &EventStore, range: DateRange) -> Result<()> {
    let events = store.query_range(&range)?;

    if events.is_empty() {
        println!("{}", "  No events in range".dimmed());
        return Ok(());
    }

    let mut current_day = None;
    for event in &events {
        let day = event.start_time.date();
        if current_day != Some(day) {
            println!("{}", day.format("%A %e %B %Y").to_string().bold());
            current_day = Some(day);
        }
        println!("   {}", event.render());
    }

    Ok(())
}
