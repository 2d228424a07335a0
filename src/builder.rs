//! Validated construction of segments, blocks, and workout records
//!
//! Raw user-entered strings come in, normalized immutable values come out.
//! A record is either fully valid or not constructed at all; a rejected
//! input leaves any in-progress draft lists untouched so the caller can
//! correct and resubmit.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Block, BlockKind, Category, Segment, Weekday, WorkoutPayload, WorkoutRecord,
};

/// Local validation failures raised at record-construction time.
/// None is retried and none is fatal; the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Distance did not parse or was not positive
    #[error("Invalid distance: must be a number greater than 0")]
    InvalidDistance,

    /// Composed time was not positive
    #[error("Invalid time: total time must be greater than 0")]
    InvalidTime,

    /// Athlete name empty after trimming
    #[error("Missing athlete name")]
    MissingAthleteName,

    /// A list the category requires is empty
    #[error("Incomplete workout: {0}")]
    IncompletePayload(String),

    /// Category tag not part of the closed set
    #[error("Unknown workout category: {0}")]
    UnknownCategory(String),
}

/// A segment under interactive construction. The draft id exists only so the
/// editing session can address entries (remove, duplicate) before the record
/// is built; it is stripped at build time and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSegment {
    pub draft_id: Uuid,
    pub segment: Segment,
}

/// A block under interactive construction, same ephemeral-id rule as
/// [`DraftSegment`].
#[derive(Debug, Clone, PartialEq)]
pub struct DraftBlock {
    pub draft_id: Uuid,
    pub kind: BlockKind,
    pub block: Block,
}

/// Parse a numeric sub-field, defaulting missing or unparseable input to 0
fn parse_or_zero(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

fn normalize_note(note: &str) -> Option<String> {
    let trimmed = note.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate raw segment fields and assemble a draft segment.
///
/// Time and recovery each arrive as separate minute/second fields; missing
/// or unparseable sub-fields default to 0. Recovery may be 0 but is clamped
/// non-negative.
pub fn build_segment(
    raw_distance: &str,
    raw_time_min: &str,
    raw_time_sec: &str,
    raw_rec_min: &str,
    raw_rec_sec: &str,
    note: &str,
) -> Result<DraftSegment, ValidationError> {
    let distance_m = raw_distance
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidDistance)?;
    if !(distance_m > 0.0) {
        return Err(ValidationError::InvalidDistance);
    }

    let time_s = parse_or_zero(raw_time_min) * 60.0 + parse_or_zero(raw_time_sec);
    if !(time_s > 0.0) {
        return Err(ValidationError::InvalidTime);
    }

    let recovery_s = (parse_or_zero(raw_rec_min) * 60.0 + parse_or_zero(raw_rec_sec)).max(0.0);

    Ok(DraftSegment {
        draft_id: Uuid::new_v4(),
        segment: Segment {
            distance_m,
            time_s,
            recovery_s,
            note: normalize_note(note),
        },
    })
}

/// Validate raw block fields and assemble a draft block of the given kind.
pub fn build_block(
    kind: BlockKind,
    raw_time_min: &str,
    raw_distance: &str,
    note: &str,
) -> Result<DraftBlock, ValidationError> {
    let time_min = parse_or_zero(raw_time_min);
    if !(time_min > 0.0) {
        return Err(ValidationError::InvalidTime);
    }

    let distance_m = parse_or_zero(raw_distance);
    if !(distance_m > 0.0) {
        return Err(ValidationError::InvalidDistance);
    }

    Ok(DraftBlock {
        draft_id: Uuid::new_v4(),
        kind,
        block: Block {
            time_min,
            distance_m,
            note: normalize_note(note),
        },
    })
}

/// Append a copy of the last draft segment with a fresh draft id.
/// No-op on an empty list.
pub fn duplicate_last_segment(drafts: &mut Vec<DraftSegment>) {
    if let Some(last) = drafts.last().cloned() {
        drafts.push(DraftSegment {
            draft_id: Uuid::new_v4(),
            segment: last.segment,
        });
    }
}

/// Append a copy of the last draft block with a fresh draft id.
/// No-op on an empty list.
pub fn duplicate_last_block(drafts: &mut Vec<DraftBlock>) {
    if let Some(last) = drafts.last().cloned() {
        drafts.push(DraftBlock {
            draft_id: Uuid::new_v4(),
            kind: last.kind,
            block: last.block,
        });
    }
}

fn strip_segments(drafts: Vec<DraftSegment>) -> Vec<Segment> {
    drafts.into_iter().map(|d| d.segment).collect()
}

fn strip_blocks(drafts: Vec<DraftBlock>) -> Vec<Block> {
    drafts.into_iter().map(|d| d.block).collect()
}

/// Assemble the immutable workout record from validated draft lists.
///
/// Each category requires its own list(s) to be non-empty; combined shapes
/// require both. Draft ids are stripped, and the identifier and creation
/// timestamp derive from the same captured instant.
pub fn build_workout_record(
    athlete: &str,
    day: Weekday,
    category: Category,
    segments: Vec<DraftSegment>,
    fartlek_blocks: Vec<DraftBlock>,
    power_blocks: Vec<DraftBlock>,
) -> Result<WorkoutRecord, ValidationError> {
    let athlete = athlete.trim();
    if athlete.is_empty() {
        return Err(ValidationError::MissingAthleteName);
    }

    let need_segments = |segments: &[DraftSegment]| {
        if segments.is_empty() {
            Err(ValidationError::IncompletePayload(
                "at least one interval segment is required".to_string(),
            ))
        } else {
            Ok(())
        }
    };
    let need_blocks = |blocks: &[DraftBlock], kind: BlockKind| {
        if blocks.is_empty() {
            Err(ValidationError::IncompletePayload(format!(
                "at least one {} block is required",
                kind.to_string().to_lowercase()
            )))
        } else {
            Ok(())
        }
    };

    let payload = match category {
        Category::Intervals => {
            need_segments(&segments)?;
            WorkoutPayload::Intervals {
                segments: strip_segments(segments),
            }
        }
        Category::Fartlek => {
            need_blocks(&fartlek_blocks, BlockKind::Fartlek)?;
            WorkoutPayload::Fartlek {
                blocks: strip_blocks(fartlek_blocks),
            }
        }
        Category::AerobicPower => {
            need_blocks(&power_blocks, BlockKind::AerobicPower)?;
            WorkoutPayload::AerobicPower {
                blocks: strip_blocks(power_blocks),
            }
        }
        Category::FartlekIntervals => {
            need_blocks(&fartlek_blocks, BlockKind::Fartlek)?;
            need_segments(&segments)?;
            WorkoutPayload::FartlekIntervals {
                blocks: strip_blocks(fartlek_blocks),
                segments: strip_segments(segments),
            }
        }
        Category::AerobicPowerIntervals => {
            need_blocks(&power_blocks, BlockKind::AerobicPower)?;
            need_segments(&segments)?;
            WorkoutPayload::AerobicPowerIntervals {
                blocks: strip_blocks(power_blocks),
                segments: strip_segments(segments),
            }
        }
    };

    // One instant serves as both identifier source and creation timestamp
    let created_at = chrono::Utc::now();
    Ok(WorkoutRecord {
        id: created_at.timestamp_millis().to_string(),
        athlete: athlete.to_string(),
        day,
        payload,
        created_at,
    })
}
