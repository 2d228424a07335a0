use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tabled::Table;

use intervalog::builder::{
    build_block, build_segment, build_workout_record, duplicate_last_segment, DraftBlock,
    DraftSegment,
};
use intervalog::config::{default_config_path, AppConfig};
use intervalog::error::IntervalogError;
use intervalog::export::{csv, text, ExportFormat};
use intervalog::logging::{init_logging, LogLevel};
use intervalog::models::{BlockKind, Category, Weekday, WorkoutRecord};
use intervalog::pace::format_duration;
use intervalog::render::{render_workout_tables, TableRows};
use intervalog::stats::compute_stats;
use intervalog::store::{StoreError, WorkoutStore};

/// intervalog - structured running workout log
///
/// Records interval series, fartlek blocks, and aerobic-power blocks,
/// and derives paces, summary statistics, CSV exports, and printable
/// reports from them.
#[derive(Parser)]
#[command(name = "intervalog")]
#[command(version = "0.1.0")]
#[command(about = "Structured running workout log", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new workout
    Add {
        /// Athlete name
        #[arg(short, long)]
        athlete: Option<String>,

        /// Day of the week (monday..sunday)
        #[arg(short, long)]
        day: Weekday,

        /// Workout category: intervals, fartlek, aerobic-power,
        /// fartlek-intervals, aerobic-power-intervals
        #[arg(long)]
        category: String,

        /// Interval segment as "distance,timeMin,timeSec[,recMin[,recSec[,note]]]"
        /// (repeatable, order preserved)
        #[arg(short, long = "segment")]
        segments: Vec<String>,

        /// Fartlek block as "timeMin,distance[,note]" (repeatable)
        #[arg(long = "fartlek")]
        fartlek_blocks: Vec<String>,

        /// Aerobic-power block as "timeMin,distance[,note]" (repeatable)
        #[arg(long = "power")]
        power_blocks: Vec<String>,

        /// Repeat the last given segment this many extra times
        #[arg(long, default_value = "0")]
        repeat_last: usize,
    },

    /// List recorded workouts
    List,

    /// Show one workout with its pace tables
    Show {
        /// Workout identifier
        id: String,
    },

    /// Display aggregate statistics
    Stats,

    /// Remove a workout by identifier
    Remove {
        /// Workout identifier
        id: String,
    },

    /// Remove all workouts
    Clear,

    /// Export workouts to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (csv, text)
        #[arg(short = 'f', long, default_value = "csv")]
        format: String,

        /// Export the full detail of one workout instead of the summary list
        #[arg(long)]
        id: Option<String>,
    },

    /// Print a workout report to stdout
    Report {
        /// Workout identifier
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = AppConfig::load(&config_path)?;

    let mut log_config = config.logging.clone();
    if cli.verbose > 0 {
        log_config.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&log_config)?;

    match run(cli, config) {
        Ok(()) => Ok(()),
        Err(e) => {
            let message = match e.downcast_ref::<IntervalogError>() {
                Some(ie) => {
                    match ie.severity().to_tracing_level() {
                        tracing::Level::WARN => tracing::warn!(error = %ie, "command failed"),
                        _ => tracing::error!(error = %ie, "command failed"),
                    }
                    ie.user_message()
                }
                None => e.to_string(),
            };
            eprintln!("{} {}", "error:".red().bold(), message);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let mut store =
        WorkoutStore::load(&config.settings.workout_file).map_err(IntervalogError::from)?;

    match cli.command {
        Commands::Add {
            athlete,
            day,
            category,
            segments,
            fartlek_blocks,
            power_blocks,
            repeat_last,
        } => {
            let athlete = athlete
                .or_else(|| config.settings.default_athlete.clone())
                .unwrap_or_default();
            let category: Category = category.parse().map_err(IntervalogError::from)?;

            let mut segment_drafts = parse_segment_specs(&segments)?;
            for _ in 0..repeat_last {
                duplicate_last_segment(&mut segment_drafts);
            }
            let fartlek_drafts = parse_block_specs(&fartlek_blocks, BlockKind::Fartlek)?;
            let power_drafts = parse_block_specs(&power_blocks, BlockKind::AerobicPower)?;

            let record = build_workout_record(
                &athlete,
                day,
                category,
                segment_drafts,
                fartlek_drafts,
                power_drafts,
            )
            .map_err(IntervalogError::from)?;
            let id = record.id.clone();
            store.append(record).map_err(IntervalogError::from)?;

            println!(
                "{} workout {} recorded ({})",
                "✓".green(),
                id.bold(),
                category
            );
        }

        Commands::List => {
            if store.is_empty() {
                println!("No workouts recorded yet.");
                return Ok(());
            }

            let rows: Vec<SummaryRow> = store.workouts().iter().map(SummaryRow::from).collect();
            println!("{}", Table::new(rows));
        }

        Commands::Show { id } => {
            let record = require_workout(&store, &id)?;
            print_workout(record);
        }

        Commands::Stats => {
            let stats = compute_stats(store.workouts());
            println!("{}", "TRAINING STATISTICS".bold());
            println!("Total workouts:         {}", stats.total_workouts);
            println!("Total segments:         {}", stats.total_segments);
            println!("Fartlek workouts:       {}", stats.fartlek_workouts);
            println!("Aerobic-power workouts: {}", stats.aerobic_power_workouts);
            println!("Distinct athletes:      {}", stats.distinct_athletes);
        }

        Commands::Remove { id } => {
            let removed = store.remove(&id).map_err(IntervalogError::from)?;
            println!(
                "{} removed workout {} ({}, {})",
                "✓".green(),
                removed.id.bold(),
                removed.athlete,
                removed.category()
            );
        }

        Commands::Clear => {
            let count = store.clear().map_err(IntervalogError::from)?;
            println!("{} cleared {} workout(s)", "✓".green(), count);
        }

        Commands::Export { output, format, id } => {
            let format = ExportFormat::from_str(&format).map_err(IntervalogError::from)?;
            match (format, id) {
                (ExportFormat::Csv, None) => {
                    csv::export_collection_csv(store.workouts(), &output)
                        .map_err(IntervalogError::from)?;
                }
                (ExportFormat::Csv, Some(id)) => {
                    let record = require_workout(&store, &id)?;
                    csv::export_workout_csv(record, &output).map_err(IntervalogError::from)?;
                }
                (ExportFormat::Text, Some(id)) => {
                    let record = require_workout(&store, &id)?;
                    text::export_workout_report(record, &output)
                        .map_err(IntervalogError::from)?;
                }
                (ExportFormat::Text, None) => {
                    bail!("text export needs a workout id (--id)");
                }
            }
            println!("{} exported to {}", "✓".green(), output.display());
        }

        Commands::Report { id } => {
            let record = require_workout(&store, &id)?;
            let mut stdout = std::io::stdout();
            text::write_workout_report(record, &mut stdout).map_err(IntervalogError::from)?;
        }
    }

    Ok(())
}

fn require_workout<'a>(
    store: &'a WorkoutStore,
    id: &str,
) -> std::result::Result<&'a WorkoutRecord, IntervalogError> {
    store.find(id).ok_or_else(|| {
        IntervalogError::Store(StoreError::NotFound { id: id.to_string() })
    })
}

/// Parse "distance,timeMin,timeSec[,recMin[,recSec[,note]]]" specs into
/// draft segments. Missing fields arrive at the builder as empty strings.
fn parse_segment_specs(
    specs: &[String],
) -> std::result::Result<Vec<DraftSegment>, IntervalogError> {
    let mut drafts = Vec::with_capacity(specs.len());
    for spec in specs {
        let mut parts = spec.splitn(6, ',');
        let distance = parts.next().unwrap_or("");
        let time_min = parts.next().unwrap_or("");
        let time_sec = parts.next().unwrap_or("");
        let rec_min = parts.next().unwrap_or("");
        let rec_sec = parts.next().unwrap_or("");
        let note = parts.next().unwrap_or("");
        drafts.push(build_segment(
            distance, time_min, time_sec, rec_min, rec_sec, note,
        )?);
    }
    Ok(drafts)
}

/// Parse "timeMin,distance[,note]" specs into draft blocks.
fn parse_block_specs(
    specs: &[String],
    kind: BlockKind,
) -> std::result::Result<Vec<DraftBlock>, IntervalogError> {
    let mut drafts = Vec::with_capacity(specs.len());
    for spec in specs {
        let mut parts = spec.splitn(3, ',');
        let time_min = parts.next().unwrap_or("");
        let distance = parts.next().unwrap_or("");
        let note = parts.next().unwrap_or("");
        drafts.push(build_block(kind, time_min, distance, note)?);
    }
    Ok(drafts)
}

fn print_workout(record: &WorkoutRecord) {
    println!(
        "{} | {} on {} ({})",
        record.id.bold(),
        record.athlete,
        record.day,
        record.category()
    );
    println!(
        "Created {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    for table in render_workout_tables(record) {
        println!("{}", table.title.bold());
        match table.rows {
            TableRows::Segments(rows) => println!("{}", Table::new(rows)),
            TableRows::Blocks(rows) => println!("{}", Table::new(rows)),
        }
        println!();
    }

    println!(
        "Total duration: {}",
        format_duration(record.total_duration_seconds()).bold()
    );
}

/// Terminal summary row for `list`
#[derive(tabled::Tabled)]
struct SummaryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Athlete")]
    athlete: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Segments")]
    segments: usize,
    #[tabled(rename = "Blocks")]
    blocks: usize,
    #[tabled(rename = "Duration")]
    duration: String,
}

impl From<&WorkoutRecord> for SummaryRow {
    fn from(record: &WorkoutRecord) -> Self {
        SummaryRow {
            id: record.id.clone(),
            athlete: record.athlete.clone(),
            day: record.day.to_string(),
            category: record.category().to_string(),
            segments: record.payload.segments().len(),
            blocks: record.payload.blocks().len(),
            duration: format_duration(record.total_duration_seconds()),
        }
    }
}
