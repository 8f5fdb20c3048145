// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use rota::MonthSchedule;
use rota_domain::{DutyCategory, Member, MonthKey, RotaConfig};
use rota_persistence::{JsonDirMirror, SqliteStore};
use rota_service::{ClearOutcome, ScheduleService, Session};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::Month;
use tracing::info;

/// Rota - duty assignment administration for a congregation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Directory receiving best-effort JSON mirror copies of every write.
    #[arg(long)]
    mirror_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Show the active schedule
    Show,
    /// List the member roster
    Roster,
    /// Generate one duty category for a month
    Generate {
        /// Month number (1-12)
        #[arg(short, long)]
        month: u8,
        /// Year
        #[arg(short, long)]
        year: i32,
        /// Duty category: ushers, microphones, or audio-video
        #[arg(short, long)]
        category: String,
    },
    /// List every archived month
    List,
    /// Load a saved month into the session
    Load {
        /// Month number (1-12)
        #[arg(short, long)]
        month: u8,
        /// Year
        #[arg(short, long)]
        year: i32,
    },
    /// Save the active schedule to the archive without finalizing
    Save,
    /// Finalize the active schedule
    Finalize,
    /// Remove one month from the archive
    ClearMonth {
        /// Month number (1-12)
        #[arg(short, long)]
        month: u8,
        /// Year
        #[arg(short, long)]
        year: i32,
    },
    /// Remove every stored collection (roster, schedules, ancillary sets)
    ClearAll,
}

fn month_key(year: i32, month: u8) -> Result<MonthKey, Box<dyn std::error::Error>> {
    let month = Month::try_from(month)?;
    Ok(MonthKey::new(year, month))
}

fn print_schedule(schedule: &MonthSchedule, roster: &[Member]) {
    let names: BTreeMap<_, _> = roster.iter().map(|m| (&m.id, m.name.as_str())).collect();
    println!("Schedule {} [{}]", schedule.key, schedule.status);

    for (date, sheet) in &schedule.days {
        println!("  {date}");
        for (slot, member) in &sheet.assignments {
            let assignee = member
                .as_ref()
                .and_then(|id| names.get(id).copied())
                .unwrap_or("(blank)");
            println!("    {:<24} {assignee}", slot.descriptor().label);
        }
        if let Some(group) = &sheet.post_meeting_cleaning {
            println!("    {:<24} {group}", "Post-meeting cleaning");
        }
    }

    for (week, responsible) in &schedule.weekly_cleaning {
        println!("  Week of {week}: cleaning by {responsible}");
    }

    let gaps = schedule.unfilled().len();
    if gaps > 0 {
        println!("  ({gaps} blank slots awaiting manual assignment)");
    }
}

fn run(
    service: &ScheduleService,
    session: &mut Session,
    command: CliCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        CliCommand::Show => match session.active() {
            Some(schedule) => print_schedule(schedule, &service.roster()?),
            None => println!("No schedule is loaded."),
        },
        CliCommand::Roster => {
            let roster = service.roster()?;
            if roster.is_empty() {
                println!("The roster is empty.");
            }
            for member in roster {
                println!(
                    "{:<12} {:<24} {} duties tracked",
                    member.id.value(),
                    member.name,
                    member.assignment_history.len()
                );
            }
        }
        CliCommand::Generate { month, year, category } => {
            let key = month_key(year, month)?;
            let category = DutyCategory::parse(&category)?;
            let outcome = service.generate(session, key, category)?;
            println!("Generated {category} for {key} (draft).");
            if !outcome.unfilled.is_empty() {
                println!("{} slots could not be filled:", outcome.unfilled.len());
                for (date, slot) in outcome.unfilled {
                    println!("  {date}: {}", slot.descriptor().label);
                }
            }
        }
        CliCommand::List => {
            let months = service.archived_months()?;
            if months.is_empty() {
                println!("The archive is empty.");
            }
            for (key, status) in months {
                println!("{key} [{status}]");
            }
        }
        CliCommand::Load { month, year } => {
            let key = month_key(year, month)?;
            match service.load_month(session, key)? {
                Some(status) => println!("Loaded {key} [{status}]."),
                None => println!("No saved schedule for {key}."),
            }
        }
        CliCommand::Save => {
            service.save_progress(session)?;
            println!("Progress saved.");
        }
        CliCommand::Finalize => {
            service.finalize(session)?;
            println!("Schedule finalized and archived.");
        }
        CliCommand::ClearMonth { month, year } => {
            let key = month_key(year, month)?;
            match service.clear_month(session, key)? {
                ClearOutcome::Removed => println!("Schedule for {key} cleared."),
                ClearOutcome::NothingToClear => println!("No data to clear for {key}."),
            }
        }
        CliCommand::ClearAll => {
            service.clear_all_data(session)?;
            println!("All stored data cleared.");
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let store: SqliteStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteStore::open(Path::new(db_path))?
    } else {
        info!("Using in-memory database");
        SqliteStore::open_in_memory()?
    };

    let config = RotaConfig::default();
    let service = match &args.mirror_dir {
        Some(dir) => {
            info!("Mirroring writes to: {}", dir.display());
            ScheduleService::with_mirror(store, Arc::new(JsonDirMirror::new(dir)), config)
        }
        None => ScheduleService::new(store, config),
    };

    let mut session = service.open_session()?;
    run(&service, &mut session, args.command)
}
