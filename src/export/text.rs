//! Printable workout report in plain text
//!
//! A static document with the record metadata and one aligned table per
//! section. Pagination is the consumer's concern.

use std::io::Write;
use std::path::Path;

use super::ExportError;
use crate::models::WorkoutRecord;
use crate::pace::format_duration;
use crate::render::{render_workout_tables, TableRows};

/// Export one workout as a printable text report.
pub fn export_workout_report<P: AsRef<Path>>(
    record: &WorkoutRecord,
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;
    write_workout_report(record, &mut file)
}

/// Write the report to any destination (file, stdout, test buffer).
pub fn write_workout_report<W: Write>(
    record: &WorkoutRecord,
    out: &mut W,
) -> Result<(), ExportError> {
    writeln!(out, "{:=<72}", "")?;
    writeln!(out, "WORKOUT REPORT")?;
    writeln!(out, "{:=<72}", "")?;
    writeln!(out)?;

    writeln!(out, "Athlete:  {}", record.athlete)?;
    writeln!(out, "Day:      {}", record.day)?;
    writeln!(out, "Category: {}", record.category())?;
    writeln!(
        out,
        "Created:  {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    for table in render_workout_tables(record) {
        writeln!(out, "{}", table.title.to_uppercase())?;
        writeln!(out, "{:-<72}", "")?;

        match &table.rows {
            TableRows::Segments(rows) => {
                writeln!(
                    out,
                    "{:<4} {:>12} {:>8} {:>9} {:>14} {:>10}  {}",
                    "#", "Distance (m)", "Time", "Recovery", "Pace /100m (s)", "Est. 800m", "Note"
                )?;
                for row in rows {
                    writeln!(
                        out,
                        "{:<4} {:>12} {:>8} {:>9} {:>14.2} {:>10}  {}",
                        row.index,
                        row.distance_m,
                        row.time,
                        row.recovery,
                        row.pace_per_100m,
                        row.estimated_800m,
                        row.note
                    )?;
                }
            }
            TableRows::Blocks(rows) => {
                writeln!(
                    out,
                    "{:<4} {:>10} {:>12} {:>8}  {}",
                    "#", "Time (min)", "Distance (m)", "Pace /km", "Note"
                )?;
                for row in rows {
                    writeln!(
                        out,
                        "{:<4} {:>10} {:>12} {:>8}  {}",
                        row.index, row.time_min, row.distance_m, row.pace_per_km, row.note
                    )?;
                }
            }
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Total duration: {}",
        format_duration(record.total_duration_seconds())
    )?;
    writeln!(out, "{:=<72}", "")?;

    Ok(())
}
