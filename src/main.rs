use clap::{Parser, Subcommand};
use rhythm_schedule::components::schedule::{
    DateRange, InMemoryStore, ScheduleHandle, ScheduleSnapshot, UserSchedule,
};
use rhythm_schedule::components::shift::{
    get_allowed_shift_types, is_valid_shift_type, ShiftType, WorkType,
};
use rhythm_schedule::config::Config;
use rhythm_schedule::error::{Error, ScheduleResult};
use rhythm_schedule::startup;
use rhythm_schedule::utils::time::{
    format_iso_date, format_time_to_hhmm, parse_iso_date, today_in,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// User id for the local snapshot
const LOCAL_USER: &str = "local";

#[derive(Parser)]
#[command(name = "rhythm-schedule")]
#[command(about = "Shift-type rules and range scheduling for shift workers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule snapshot file (overrides SCHEDULE_FILE)
    #[arg(long, global = true)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the shift types allowed for a work type
    Allowed {
        /// 2shift, 3shift, fixed_night or irregular
        work_type: String,
    },

    /// Check whether a shift type is allowed for a work type
    Check { work_type: String, shift: ShiftType },

    /// Assign one shift to every day of a date range
    Apply {
        /// First day (YYYY-MM-DD)
        start: String,
        /// Last day, inclusive (YYYY-MM-DD)
        end: String,
        shift: ShiftType,
        /// Work type to validate against (defaults to DEFAULT_WORK_TYPE)
        #[arg(short, long)]
        work_type: Option<String>,
    },

    /// Print the stored schedule
    Show {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },

    /// Propose the default range starting today
    DefaultRange,

    /// Rewrite shifts the work type does not allow to off
    Cleanup {
        work_type: String,
        /// Actually rewrite entries (default is a dry run)
        #[arg(long)]
        apply: bool,
    },

    /// Reduce HH:MM:SS to HH:MM
    FormatTime { time: Option<String> },
}

fn read_snapshot(path: &Path) -> ScheduleResult<ScheduleSnapshot> {
    if !path.exists() {
        debug!("No snapshot at {}, starting empty", path.display());
        return Ok(ScheduleSnapshot::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_snapshot(path: &Path, schedule: &UserSchedule) -> ScheduleResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&schedule.snapshot())?;
    fs::write(path, json)?;
    info!("Wrote {} entries to {}", schedule.len(), path.display());
    Ok(())
}

/// Open the snapshot behind a schedule actor
async fn open_handle(path: &Path, work_type: &str) -> ScheduleResult<ScheduleHandle> {
    let snapshot = read_snapshot(path)?;
    let store = InMemoryStore::from_snapshot(LOCAL_USER, &snapshot)?;
    let handle = ScheduleHandle::new(Arc::new(store));
    handle.register_work_type(LOCAL_USER, work_type).await?;
    Ok(handle)
}

async fn run(cli: Cli, config: Config) -> ScheduleResult<()> {
    let path = cli.file.unwrap_or_else(|| config.schedule_file.clone());

    match cli.command {
        Commands::Allowed { work_type } => {
            let allowed = get_allowed_shift_types(&work_type);
            for shift in allowed {
                println!("{}\t{}", shift, shift.full_label());
            }
        }
        Commands::Check { work_type, shift } => {
            let valid = is_valid_shift_type(&work_type, shift);
            println!("{}", valid);
            if !valid {
                return Err(Error::ShiftNotAllowed {
                    work_type: WorkType::from_str_lenient(&work_type).to_string(),
                    shift: shift.to_string(),
                });
            }
        }
        Commands::Apply {
            start,
            end,
            shift,
            work_type,
        } => {
            let work_type = work_type.unwrap_or_else(|| config.default_work_type.to_string());
            let handle = open_handle(&path, &work_type).await?;

            let entries = handle.apply_range_str(LOCAL_USER, &start, &end, shift).await?;
            let schedule = handle.get_schedule(LOCAL_USER).await?;
            handle.shutdown().await?;

            write_snapshot(&path, &schedule)?;
            println!("{} {}", entries.len(), shift.full_label());
        }
        Commands::Show { from, to } => {
            let from = from.as_deref().map(parse_iso_date).transpose()?;
            let to = to.as_deref().map(parse_iso_date).transpose()?;
            // Ordering only matters when the user gave both bounds
            if let (Some(start), Some(end)) = (from, to) {
                DateRange::new(start, end)?;
            }

            let schedule = UserSchedule::from_snapshot(&read_snapshot(&path)?)?;
            for entry in schedule.entries_between(from, to) {
                println!("{}", entry.format());
            }
        }
        Commands::DefaultRange => {
            let today = today_in(config.tz()?);
            let range = DateRange::week_from(today, config.default_range_days)?;
            println!("{} {}", format_iso_date(range.start()), format_iso_date(range.end()));
        }
        Commands::Cleanup { work_type, apply } => {
            let handle = open_handle(&path, &work_type).await?;
            let report = handle.cleanup(LOCAL_USER, !apply).await?;
            let schedule = handle.get_schedule(LOCAL_USER).await?;
            handle.shutdown().await?;

            for entry in &report.invalid {
                println!("{}", entry.format());
            }
            println!("{}", report.summary());

            if report.rewritten > 0 {
                write_snapshot(&path, &schedule)?;
            }
        }
        Commands::FormatTime { time } => {
            println!("{}", format_time_to_hhmm(time.as_deref()));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    startup::init_logging()?;

    let cli = Cli::parse();
    let config = startup::load_config()?;

    run(cli, config).await.map_err(|e| {
        eprintln!("{}", e.user_message());
        e.into()
    })
}
