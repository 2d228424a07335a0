//! CSV export
//!
//! Spreadsheet-bound output. A UTF-8 byte-order marker precedes the payload
//! so downstream tools detect the character set, and fields containing the
//! separator, quotes, or line breaks are quoted with internal quotes doubled
//! (the csv crate's necessary-quoting).

use std::io::Write;
use std::path::Path;

use super::ExportError;
use crate::models::WorkoutRecord;
use crate::pace::format_duration;
use crate::render::{render_workout_tables, TableRows};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Export one summary row per workout.
pub fn export_collection_csv<P: AsRef<Path>>(
    workouts: &[WorkoutRecord],
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([
        "ID",
        "Athlete",
        "Day",
        "Category",
        "Segments",
        "Blocks",
        "Total_Duration",
        "Created_At",
    ])?;

    for record in workouts {
        writer.write_record([
            record.id.clone(),
            record.athlete.clone(),
            record.day.to_string(),
            record.category().to_string(),
            record.payload.segments().len().to_string(),
            record.payload.blocks().len().to_string(),
            format_duration(record.total_duration_seconds()),
            record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Export the full detail of one workout: metadata, then each titled section
/// with its rows. Sections have different widths, so the writer is flexible.
pub fn export_workout_csv<P: AsRef<Path>>(
    record: &WorkoutRecord,
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

    writer.write_record(["Athlete".to_string(), record.athlete.clone()])?;
    writer.write_record(["Day".to_string(), record.day.to_string()])?;
    writer.write_record(["Category".to_string(), record.category().to_string()])?;
    writer.write_record([
        "Created".to_string(),
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ])?;
    writer.write_record([
        "Total duration".to_string(),
        format_duration(record.total_duration_seconds()),
    ])?;

    for table in render_workout_tables(record) {
        writer.write_record([table.title.as_str()])?;

        match &table.rows {
            TableRows::Segments(rows) => {
                writer.write_record([
                    "#",
                    "Distance (m)",
                    "Time",
                    "Recovery",
                    "Pace /100m (s)",
                    "Est. 800m",
                    "Note",
                ])?;
                for row in rows {
                    writer.write_record([
                        row.index.to_string(),
                        row.distance_m.to_string(),
                        row.time.clone(),
                        row.recovery.clone(),
                        row.pace_per_100m.to_string(),
                        row.estimated_800m.clone(),
                        row.note.clone(),
                    ])?;
                }
            }
            TableRows::Blocks(rows) => {
                writer.write_record(["#", "Time (min)", "Distance (m)", "Pace /km", "Note"])?;
                for row in rows {
                    writer.write_record([
                        row.index.to_string(),
                        row.time_min.to_string(),
                        row.distance_m.to_string(),
                        row.pace_per_km.clone(),
                        row.note.clone(),
                    ])?;
                }
            }
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Block, Segment, Weekday, WorkoutPayload};
    use chrono::Utc;
    use tempfile::NamedTempFile;

    fn interval_record(note: Option<&str>) -> WorkoutRecord {
        WorkoutRecord {
            id: "1700000000000".to_string(),
            athlete: "Ana".to_string(),
            day: Weekday::Tuesday,
            payload: WorkoutPayload::Intervals {
                segments: vec![Segment {
                    distance_m: 400.0,
                    time_s: 90.0,
                    recovery_s: 60.0,
                    note: note.map(String::from),
                }],
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_collection_csv_starts_with_bom() {
        let temp_file = NamedTempFile::new().unwrap();
        export_collection_csv(&[interval_record(None)], temp_file.path()).unwrap();

        let bytes = std::fs::read(temp_file.path()).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);

        let content = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert!(content.starts_with("ID,Athlete,Day"));
        assert!(content.contains("1700000000000,Ana,Tuesday,Intervals,1,0,01:30"));
    }

    #[test]
    fn test_workout_csv_sections() {
        let record = WorkoutRecord {
            id: "1700000000001".to_string(),
            athlete: "Ben".to_string(),
            day: Weekday::Saturday,
            payload: WorkoutPayload::FartlekIntervals {
                blocks: vec![Block {
                    time_min: 10.0,
                    distance_m: 2500.0,
                    note: None,
                }],
                segments: vec![Segment {
                    distance_m: 400.0,
                    time_s: 90.0,
                    recovery_s: 60.0,
                    note: None,
                }],
            },
            created_at: Utc::now(),
        };

        let temp_file = NamedTempFile::new().unwrap();
        export_workout_csv(&record, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("Athlete,Ben"));
        assert!(content.contains("Fartlek blocks"));
        assert!(content.contains("Interval series"));
        // block section precedes the segment section
        assert!(content.find("Fartlek blocks").unwrap() < content.find("Interval series").unwrap());
        assert!(content.contains("1,400,01:30,01:00,22.5,03:00,"));
    }

    #[test]
    fn test_note_with_comma_and_quote_is_escaped() {
        let record = interval_record(Some("hard, \"all out\" effort"));

        let temp_file = NamedTempFile::new().unwrap();
        export_workout_csv(&record, temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("\"hard, \"\"all out\"\" effort\""));
    }
}
