//! `smartschedule` — command-line front end for the SmartSchedule timetable.
//!
//! # Usage
//!
//! ```text
//! smartschedule add "Математика" --start 08:30 --end 09:15 --day 0 --room 101
//! smartschedule day 2025-01-06
//! smartschedule week --offset 1
//! smartschedule export backup.json
//! ```

mod commands;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use smartschedule_core::{JsonPersistence, ScheduleStore, prefs::Language};
use smartschedule_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "smartschedule", version, about = "Personal class schedule")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", env = "SMARTSCHEDULE_CONFIG")]
  config: Option<PathBuf>,

  /// SQLite file to use instead of the configured `store_path`.
  #[arg(long, value_name = "PATH")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a lesson.
  Add(AddArgs),
  /// Replace fields of an existing lesson.
  Edit(EditArgs),
  /// Delete a lesson by id.
  Rm { id: String },
  /// Show the lessons of one day (default: today).
  Day {
    date: Option<NaiveDate>,
    /// Move this many days from `date`.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
  },
  /// Show the week grid for the week containing `date` (default: today).
  Week {
    date: Option<NaiveDate>,
    /// Move this many weeks from that week.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
  },
  /// List every stored lesson.
  List,
  /// Write a JSON backup (default file name in the current directory).
  Export { path: Option<PathBuf> },
  /// Replace the whole schedule with a JSON backup.
  Import { path: PathBuf },
  /// Delete every lesson.
  Clear {
    /// Required; there is no undo.
    #[arg(long)]
    yes: bool,
  },
  /// Show or change display preferences.
  Prefs(PrefsArgs),
}

#[derive(Args, Debug)]
struct AddArgs {
  subject: String,
  #[arg(short, long, default_value = "")]
  teacher: String,
  #[arg(short, long, default_value = "")]
  room: String,
  #[arg(short, long, default_value = "09:00")]
  start: String,
  #[arg(short, long, default_value = "10:00")]
  end: String,
  /// Weekday, 0 = Monday … 6 = Sunday. Defaults to the weekday of `--date`,
  /// else Monday.
  #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=6))]
  day: Option<u8>,
  /// Make this a one-off lesson on the given date (YYYY-MM-DD).
  #[arg(long)]
  date: Option<NaiveDate>,
  /// Hex color; defaults to the palette color for the subject.
  #[arg(short, long)]
  color: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
  id: String,
  #[arg(long)]
  subject: Option<String>,
  #[arg(short, long)]
  teacher: Option<String>,
  #[arg(short, long)]
  room: Option<String>,
  #[arg(short, long)]
  start: Option<String>,
  #[arg(short, long)]
  end: Option<String>,
  #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=6))]
  day: Option<u8>,
  #[arg(long, conflicts_with = "recurring")]
  date: Option<NaiveDate>,
  /// Drop the date, turning the lesson back into a weekly one.
  #[arg(long)]
  recurring: bool,
  #[arg(short, long)]
  color: Option<String>,
}

#[derive(Args, Debug)]
struct PrefsArgs {
  #[arg(long)]
  dark: Option<bool>,
  #[arg(long)]
  notifications: Option<bool>,
  #[arg(long)]
  language: Option<Language>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  // CLI flag overrides config file and environment.
  let mut settings = Settings::load(cli.config.as_deref())?;
  if let Some(path) = cli.store {
    settings.store_path = settings::expand_tilde(&path);
  }

  let kv = SqliteStore::open(&settings.store_path)
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  let mut schedule = ScheduleStore::open(JsonPersistence::new(kv));

  commands::run(cli.command, &mut schedule)
}
