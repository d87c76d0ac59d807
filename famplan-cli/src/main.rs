mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use famplan_core::date_range::DateRange;
use famplan_core::store::EventStore;

use crate::commands::new::NewArgs;

#[derive(Parser)]
#[command(name = "famplan")]
#[command(about = "Create family events and browse the shared agenda")]
struct Cli {
    /// Path to the event store (defaults to the user data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an event, optionally as a recurring series
    New(NewArgs),
    /// List events in a date range
    Agenda {
        /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = resolve_store(cli.store)?;

    match cli.command {
        Commands::New(args) => commands::new::run(&store, args),
        Commands::Agenda { from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())
                .map_err(|e| anyhow::anyhow!(e))?;
            commands::agenda::run(&store, range)
        }
    }
}

fn resolve_store(path: Option<PathBuf>) -> Result<EventStore> {
    let path = match path {
        Some(p) => p,
        None => {
            let base = dirs::data_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not determine the user data directory"))?;
            base.join("famplan").join("events.json")
        }
    };
    Ok(EventStore::open(path))
}
