// Dash Calendar
// Command-line entry point: renders the month widget and manages the event store

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use dash_calendar::models::calendar::Calendar;
use dash_calendar::models::week_start::WeekStart;
use dash_calendar::services::access::AccessService;
use dash_calendar::services::appearance::AppearanceStore;
use dash_calendar::services::calendar::CalendarService;
use dash_calendar::services::database::Database;
use dash_calendar::services::event_source::{GatedEventSource, StoreEventSource};
use dash_calendar::services::icalendar::ICalendarService;
use dash_calendar::services::settings::SettingsService;
use dash_calendar::services::timeline::{TimelineProvider, DEFAULT_ENTRY_COUNT};
use dash_calendar::services::widget::WidgetService;
use dash_calendar::ui::text;
use dash_calendar::utils::clock::FixedClock;
use dash_calendar::utils::date::start_of_day;
use dash_calendar::utils::paths;

/// One day of per-minute entries
const MAX_ENTRY_COUNT: u64 = 1440;
/// One week
const MAX_STEP_MINUTES: i64 = 7 * 24 * 60;

#[derive(Parser)]
#[command(name = "dash-calendar", version, about = "Month calendar widget")]
struct Cli {
    /// Event store to use instead of the default location
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Appearance file (TOML) to use instead of the default location
    #[arg(long, global = true)]
    appearance: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the widget for a date (defaults to today)
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        week_start: Option<WeekStart>,
        #[arg(long)]
        json: bool,
    },
    /// Print the refresh timeline
    Timeline {
        #[arg(
            long,
            default_value_t = DEFAULT_ENTRY_COUNT as u64,
            value_parser = clap::value_parser!(u64).range(1..=MAX_ENTRY_COUNT)
        )]
        count: u64,
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(i64).range(1..=MAX_STEP_MINUTES)
        )]
        step_minutes: i64,
        #[arg(long)]
        json: bool,
    },
    /// Import an .ics file into a calendar
    Import {
        file: PathBuf,
        #[arg(long, default_value = "Imported")]
        calendar: String,
        /// Mark the calendar as a subscription (hidden from the widget)
        #[arg(long)]
        subscribed: bool,
    },
    /// Inspect or change event access
    Access {
        #[arg(value_enum, default_value_t = AccessAction::Status)]
        action: AccessAction,
    },
    /// List calendars and whether the widget shows them
    Calendars,
}

#[derive(Clone, Copy, ValueEnum)]
enum AccessAction {
    Status,
    Request,
    Grant,
    Deny,
    Reset,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let db_path = match cli.db {
        Some(path) => path,
        None => paths::default_database_path()?,
    };
    log::info!("Using event store {}", db_path.display());

    let db = Database::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to open {}", db_path.display()))?;
    db.initialize_schema()?;

    match cli.command {
        Commands::Show {
            date,
            week_start,
            json,
        } => {
            let appearance_path = match cli.appearance {
                Some(path) => path,
                None => paths::default_appearance_path()?,
            };
            show(&db, appearance_path, date, week_start, json)
        }
        Commands::Timeline {
            count,
            step_minutes,
            json,
        } => timeline(&db, count as usize, step_minutes, json),
        Commands::Import {
            file,
            calendar,
            subscribed,
        } => {
            let target = Calendar {
                is_subscribed: subscribed,
                ..Calendar::new(calendar)
            };
            let summary = ICalendarService::new(db.connection()).import_file(&file, target)?;
            println!(
                "Imported {} events into '{}' ({} skipped)",
                summary.imported, summary.calendar.name, summary.skipped
            );
            Ok(())
        }
        Commands::Access { action } => {
            let access = AccessService::new(&db);
            let status = match action {
                AccessAction::Status => access.status()?,
                AccessAction::Request => access.request()?,
                AccessAction::Grant => access.grant()?,
                AccessAction::Deny => access.deny()?,
                AccessAction::Reset => access.reset()?,
            };
            println!("{}", status);
            Ok(())
        }
        Commands::Calendars => {
            for calendar in CalendarService::new(db.connection()).list_all()? {
                let state = if calendar.is_visible() {
                    "shown"
                } else if calendar.is_subscribed {
                    "subscribed"
                } else {
                    "disabled"
                };
                println!(
                    "{:>4}  {:<24} {:<8} {}",
                    calendar.id.unwrap_or_default(),
                    calendar.name,
                    calendar.color.as_deref().unwrap_or("-"),
                    state
                );
            }
            Ok(())
        }
    }
}

fn show(
    db: &Database,
    appearance_path: PathBuf,
    date: Option<NaiveDate>,
    week_start: Option<WeekStart>,
    json: bool,
) -> Result<()> {
    let settings = SettingsService::new(db).get()?;
    let appearance = AppearanceStore::new(appearance_path).load()?;
    let access = AccessService::new(db).status()?;

    let now = date.map(start_of_day).unwrap_or_else(Local::now);
    let clock = FixedClock(now);
    let week_start = week_start.unwrap_or(settings.first_day_of_week);

    let source = GatedEventSource::new(StoreEventSource::new(db), access);
    let widget = WidgetService::new(source, clock, appearance.clone())
        .with_upcoming_window_days(settings.upcoming_window_days);
    let entry = TimelineProvider::new(clock, week_start).snapshot();
    let snapshot = widget.snapshot(&entry);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", text::render(&snapshot, &appearance, &settings.date_format));
        if !access.is_granted() {
            println!("\nEvent access is {}. Run `dash-calendar access request`.", access);
        }
    }
    Ok(())
}

fn timeline(db: &Database, count: usize, step_minutes: i64, json: bool) -> Result<()> {
    let settings = SettingsService::new(db).get()?;
    let provider = TimelineProvider::new(FixedClock(Local::now()), settings.first_day_of_week);
    let timeline = provider.timeline(count, Duration::minutes(step_minutes));

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    for entry in &timeline.entries {
        println!("{}  {}", entry.date.format("%Y-%m-%d %H:%M:%S"), entry.week_start);
    }
    println!("reload at {}", timeline.reload_at.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}
