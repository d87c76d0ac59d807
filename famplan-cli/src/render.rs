//! Terminal rendering for famplan types.
//!
//! Extension trait adding colored terminal rendering to famplan-core types
//! using owo_colors.

use famplan_core::event::Event;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let time = if self.is_anytime() {
            "anytime    ".to_string()
        } else {
            format!(
                "{}-{}",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M")
            )
        };

        let mut line = format!(
            "{} {}",
            time.dimmed(),
            colorize(&self.title, self.color.as_deref())
        );

        if !self.members.is_empty() {
            let members = format!("[{}]", self.members.join(", "));
            line.push_str(&format!(" {}", members.dimmed()));
        }
        if self.completed {
            line.push_str(&format!(" {}", "done".green()));
        }
        if self.series_id.is_some() {
            line.push_str(&format!(" {}", "(series)".dimmed()));
        }

        line
    }
}

/// Colorize a title according to the event's display color.
/// Unknown colors fall back to plain text.
fn colorize(text: &str, color: Option<&str>) -> String {
    match color {
        Some("red") => text.red().to_string(),
        Some("green") => text.green().to_string(),
        Some("blue") => text.blue().to_string(),
        Some("yellow") => text.yellow().to_string(),
        Some("purple") => text.magenta().to_string(),
        Some("cyan") => text.cyan().to_string(),
        _ => text.to_string(),
    }
}
