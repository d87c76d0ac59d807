use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use clap::Args;
use famplan_core::event::{EndCondition, Event, Frequency, RecurrenceRule, anytime_start};
use famplan_core::recurrence::expand_series;
use famplan_core::store::EventStore;
use owo_colors::OwoColorize;

#[derive(Args)]
pub struct NewArgs {
    pub title: String,

    /// Start date/time (e.g. "2026-08-20T15:00"), or a date when --anytime is set
    #[arg(short, long)]
    pub start: String,

    /// End date/time (defaults to one hour after start)
    #[arg(long, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration instead of an end time (e.g. "45m", "1h 30m")
    #[arg(short, long)]
    pub duration: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Display color (e.g. "blue")
    #[arg(long)]
    pub color: Option<String>,

    /// Family member attached to the event (repeatable)
    #[arg(short, long = "member")]
    pub members: Vec<String>,

    /// Create an "anytime today" entry instead of a timed one
    #[arg(long, conflicts_with_all = ["end", "duration"])]
    pub anytime: bool,

    /// Repeat frequency: daily, weekly, biweekly, monthly or yearly
    #[arg(short, long)]
    pub repeat: Option<String>,

    /// Stop the series after this many occurrences
    #[arg(long, requires = "repeat", conflicts_with = "until")]
    pub count: Option<u32>,

    /// Stop the series after this date (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "repeat")]
    pub until: Option<String>,
}

pub fn run(store: &EventStore, args: NewArgs) -> Result<()> {
    let (start_time, end_time) = if args.anytime {
        let start = anytime_start(parse_date(&args.start)?);
        (start, start + Duration::minutes(1))
    } else {
        let start = parse_datetime(&args.start)?;
        let end = match (&args.end, &args.duration) {
            (Some(e), _) => parse_datetime(e)?,
            (None, Some(d)) => start + parse_duration(d)?,
            (None, None) => start + Duration::hours(1),
        };
        (start, end)
    };

    if end_time < start_time {
        bail!("Event ends before it starts");
    }

    let event = Event::new(
        args.title,
        start_time,
        end_time,
        args.description,
        args.color,
        args.members,
    );

    match parse_rule(args.repeat.as_deref(), args.count, args.until.as_deref())? {
        Some(rule) => {
            let expansion = expand_series(&event, &rule)
                .context("Could not create recurring series")?;
            store.insert_events(&expansion.events)?;

            println!(
                "{}",
                format!(
                    "  Created: {} ({} occurrences)",
                    event.title,
                    expansion.events.len()
                )
                .green()
            );
            if expansion.truncated {
                println!(
                    "{}",
                    "  Series shortened by the safety cap (500 occurrences / 2 years)".yellow()
                );
            }
        }
        None => {
            store.insert_events(std::slice::from_ref(&event))?;
            println!("{}", format!("  Created: {}", event.title).green());
        }
    }

    Ok(())
}

fn parse_rule(
    repeat: Option<&str>,
    count: Option<u32>,
    until: Option<&str>,
) -> Result<Option<RecurrenceRule>> {
    let Some(freq_str) = repeat else {
        return Ok(None);
    };

    let frequency = Frequency::from_str(freq_str)?;
    let end = match (count, until) {
        (Some(n), None) => EndCondition::AfterCount(n),
        (None, Some(d)) => EndCondition::OnDate(parse_date(d)?),
        (None, None) => EndCondition::None,
        (Some(_), Some(_)) => bail!("Use either --count or --until, not both"),
    };

    Ok(Some(RecurrenceRule { frequency, end }))
}

/// Parse "YYYY-MM-DDTHH:MM", also accepting a space separator and seconds.
fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    for format in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    bail!("Invalid date/time '{}'. Expected e.g. 2026-08-20T15:00", s)
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}

fn parse_duration(s: &str) -> Result<Duration> {
    let std_duration = humantime::parse_duration(s)
        .with_context(|| format!("Invalid duration '{}'. Try e.g. \"45m\" or \"1h 30m\"", s))?;
    Duration::from_std(std_duration).context("Duration too large")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2026-08-20T15:00").is_ok());
        assert!(parse_datetime("2026-08-20 15:00").is_ok());
        assert!(parse_datetime("2026-08-20T15:00:30").is_ok());
        assert!(parse_datetime("next tuesday").is_err());
    }

    #[test]
    fn test_parse_rule_variants() {
        assert!(parse_rule(None, None, None).unwrap().is_none());

        let rule = parse_rule(Some("weekly"), Some(3), None).unwrap().unwrap();
        assert_eq!(rule.frequency, Frequency::Weekly);
        assert_eq!(rule.end, EndCondition::AfterCount(3));

        let rule = parse_rule(Some("daily"), None, Some("2026-12-31"))
            .unwrap()
            .unwrap();
        assert_eq!(
            rule.end,
            EndCondition::OnDate(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
        );

        assert!(parse_rule(Some("hourly"), None, None).is_err());
        assert!(parse_rule(Some("daily"), Some(2), Some("2026-12-31")).is_err());
    }

    #[test]
    fn test_parse_duration_strings() {
        assert_eq!(parse_duration("45m").unwrap(), Duration::minutes(45));
        assert_eq!(
            parse_duration("1h 30m").unwrap(),
            Duration::minutes(90)
        );
        assert!(parse_duration("soonish").is_err());
    }
}
