//! Projection of workout records into display rows
//!
//! Pure projections shared by the terminal table view, the printable report,
//! and the CSV exporter. Row order always matches input order and indices are
//! 1-based. Malformed payloads cannot reach this module; the builder is the
//! only construction path.

use serde::Serialize;
use tabled::Tabled;

use crate::models::{Block, Segment, WorkoutRecord};
use crate::pace::{block_pace, format_duration, segment_pace};

/// One display row for an interval segment
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SegmentRow {
    #[tabled(rename = "#")]
    pub index: usize,

    #[tabled(rename = "Distance (m)")]
    pub distance_m: f64,

    #[tabled(rename = "Time")]
    pub time: String,

    #[tabled(rename = "Recovery")]
    pub recovery: String,

    #[tabled(rename = "Pace /100m (s)")]
    pub pace_per_100m: f64,

    #[tabled(rename = "Est. 800m")]
    pub estimated_800m: String,

    #[tabled(rename = "Note")]
    pub note: String,
}

/// One display row for a continuous block
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct BlockRow {
    #[tabled(rename = "#")]
    pub index: usize,

    #[tabled(rename = "Time (min)")]
    pub time_min: f64,

    #[tabled(rename = "Distance (m)")]
    pub distance_m: f64,

    #[tabled(rename = "Pace /km")]
    pub pace_per_km: String,

    #[tabled(rename = "Note")]
    pub note: String,
}

/// Rows of one titled section of a workout
#[derive(Debug, Clone, PartialEq)]
pub enum TableRows {
    Segments(Vec<SegmentRow>),
    Blocks(Vec<BlockRow>),
}

/// A titled section of a rendered workout
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTable {
    pub title: String,
    pub rows: TableRows,
}

/// Project segments into ordered display rows (1-based index).
pub fn render_segment_rows(segments: &[Segment]) -> Vec<SegmentRow> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let pace = segment_pace(segment);
            SegmentRow {
                index: i + 1,
                distance_m: segment.distance_m,
                time: format_duration(segment.time_s),
                recovery: format_duration(segment.recovery_s),
                pace_per_100m: pace.per_100m,
                estimated_800m: format_duration(pace.estimated_800m),
                note: segment.note.clone().unwrap_or_default(),
            }
        })
        .collect()
}

/// Project blocks into ordered display rows (1-based index).
pub fn render_block_rows(blocks: &[Block]) -> Vec<BlockRow> {
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| BlockRow {
            index: i + 1,
            time_min: block.time_min,
            distance_m: block.distance_m,
            pace_per_km: block_pace(block),
            note: block.note.clone().unwrap_or_default(),
        })
        .collect()
}

/// Project one record into its titled sections. Combined shapes render the
/// block section first, then the interval series.
pub fn render_workout_tables(record: &WorkoutRecord) -> Vec<WorkoutTable> {
    let mut tables = Vec::new();

    if let Some(kind) = record.category().block_kind() {
        tables.push(WorkoutTable {
            title: format!("{} blocks", kind),
            rows: TableRows::Blocks(render_block_rows(record.payload.blocks())),
        });
    }

    if record.category().has_segments() {
        tables.push(WorkoutTable {
            title: "Interval series".to_string(),
            rows: TableRows::Segments(render_segment_rows(record.payload.segments())),
        });
    }

    tables
}
