use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timed, distance-bound repetition within an interval workout,
/// followed by a rest interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Distance covered in meters (track units)
    pub distance_m: f64,

    /// Effort time in seconds
    pub time_s: f64,

    /// Recovery after the effort, in seconds (may be 0)
    pub recovery_s: f64,

    /// Optional free-text note
    pub note: Option<String>,
}

/// One continuous timed effort over a distance, without internal rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Effort time in minutes
    pub time_min: f64,

    /// Distance covered in meters
    pub distance_m: f64,

    /// Free-text note (fartlek blocks conventionally carry one)
    pub note: Option<String>,
}

/// The two continuous-effort block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Fartlek,
    AerobicPower,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Fartlek => write!(f, "Fartlek"),
            BlockKind::AerobicPower => write!(f, "Aerobic power"),
        }
    }
}

/// Closed workout-shape tag. The payload variant a record carries is fully
/// determined by its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Interval series only
    Intervals,
    /// Fartlek blocks only
    Fartlek,
    /// Aerobic-power blocks only
    AerobicPower,
    /// Fartlek blocks followed by an interval series
    FartlekIntervals,
    /// Aerobic-power blocks followed by an interval series
    AerobicPowerIntervals,
}

impl Category {
    /// Block kind this category carries, if any (solo or combined form)
    pub fn block_kind(&self) -> Option<BlockKind> {
        match self {
            Category::Intervals => None,
            Category::Fartlek | Category::FartlekIntervals => Some(BlockKind::Fartlek),
            Category::AerobicPower | Category::AerobicPowerIntervals => {
                Some(BlockKind::AerobicPower)
            }
        }
    }

    /// Whether this category carries an interval-series list
    pub fn has_segments(&self) -> bool {
        matches!(
            self,
            Category::Intervals | Category::FartlekIntervals | Category::AerobicPowerIntervals
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Intervals => write!(f, "Intervals"),
            Category::Fartlek => write!(f, "Fartlek"),
            Category::AerobicPower => write!(f, "Aerobic power"),
            Category::FartlekIntervals => write!(f, "Fartlek + intervals"),
            Category::AerobicPowerIntervals => write!(f, "Aerobic power + intervals"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = crate::builder::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "intervals" | "series" => Ok(Category::Intervals),
            "fartlek" => Ok(Category::Fartlek),
            "aerobic-power" | "power" => Ok(Category::AerobicPower),
            "fartlek-intervals" => Ok(Category::FartlekIntervals),
            "aerobic-power-intervals" | "power-intervals" => Ok(Category::AerobicPowerIntervals),
            _ => Err(crate::builder::ValidationError::UnknownCategory(s.to_string())),
        }
    }
}

/// Day of the week the workout is scheduled on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            "sunday" | "sun" => Ok(Weekday::Sunday),
            _ => Err(format!("Invalid weekday: {}", s)),
        }
    }
}

/// Workout payload, shaped by category. Combined shapes keep their block list
/// and segment list separate; rendering order is blocks first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum WorkoutPayload {
    Intervals { segments: Vec<Segment> },
    Fartlek { blocks: Vec<Block> },
    AerobicPower { blocks: Vec<Block> },
    FartlekIntervals { blocks: Vec<Block>, segments: Vec<Segment> },
    AerobicPowerIntervals { blocks: Vec<Block>, segments: Vec<Segment> },
}

impl WorkoutPayload {
    pub fn category(&self) -> Category {
        match self {
            WorkoutPayload::Intervals { .. } => Category::Intervals,
            WorkoutPayload::Fartlek { .. } => Category::Fartlek,
            WorkoutPayload::AerobicPower { .. } => Category::AerobicPower,
            WorkoutPayload::FartlekIntervals { .. } => Category::FartlekIntervals,
            WorkoutPayload::AerobicPowerIntervals { .. } => Category::AerobicPowerIntervals,
        }
    }

    /// Interval-series list, empty slice for block-only shapes
    pub fn segments(&self) -> &[Segment] {
        match self {
            WorkoutPayload::Intervals { segments }
            | WorkoutPayload::FartlekIntervals { segments, .. }
            | WorkoutPayload::AerobicPowerIntervals { segments, .. } => segments,
            _ => &[],
        }
    }

    /// Block list, empty slice for interval-only shapes
    pub fn blocks(&self) -> &[Block] {
        match self {
            WorkoutPayload::Fartlek { blocks }
            | WorkoutPayload::AerobicPower { blocks }
            | WorkoutPayload::FartlekIntervals { blocks, .. }
            | WorkoutPayload::AerobicPowerIntervals { blocks, .. } => blocks,
            _ => &[],
        }
    }
}

/// A persisted workout. Created only through the validated builder and
/// immutable thereafter; removal from the store is the only destruction path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Unique, time-derived identifier
    pub id: String,

    /// Athlete display name (non-empty after trimming)
    pub athlete: String,

    /// Scheduled day of the week
    pub day: Weekday,

    /// Shape-tagged payload
    pub payload: WorkoutPayload,

    /// Creation timestamp (same instant the id derives from)
    pub created_at: DateTime<Utc>,
}

impl WorkoutRecord {
    pub fn category(&self) -> Category {
        self.payload.category()
    }

    /// Total elapsed time in seconds: segment times plus block minutes
    /// converted to seconds. Additive and order-independent.
    pub fn total_duration_seconds(&self) -> f64 {
        let segment_s: f64 = self.payload.segments().iter().map(|s| s.time_s).sum();
        let block_s: f64 = self.payload.blocks().iter().map(|b| b.time_min * 60.0).sum();
        segment_s + block_s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(distance_m: f64, time_s: f64) -> Segment {
        Segment {
            distance_m,
            time_s,
            recovery_s: 60.0,
            note: None,
        }
    }

    fn block(time_min: f64, distance_m: f64) -> Block {
        Block {
            time_min,
            distance_m,
            note: None,
        }
    }

    fn record(payload: WorkoutPayload) -> WorkoutRecord {
        WorkoutRecord {
            id: "1700000000000".to_string(),
            athlete: "Ana".to_string(),
            day: Weekday::Tuesday,
            payload,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_duration_intervals() {
        let rec = record(WorkoutPayload::Intervals {
            segments: vec![segment(400.0, 90.0), segment(400.0, 88.0), segment(200.0, 40.0)],
        });
        assert_eq!(rec.total_duration_seconds(), 218.0);
    }

    #[test]
    fn test_total_duration_blocks_converts_minutes() {
        let rec = record(WorkoutPayload::Fartlek {
            blocks: vec![block(10.0, 2500.0), block(5.0, 1200.0)],
        });
        assert_eq!(rec.total_duration_seconds(), 900.0);
    }

    #[test]
    fn test_total_duration_combined_sums_both_lists() {
        let rec = record(WorkoutPayload::AerobicPowerIntervals {
            blocks: vec![block(12.0, 3000.0)],
            segments: vec![segment(300.0, 60.0), segment(300.0, 58.0)],
        });
        assert_eq!(rec.total_duration_seconds(), 12.0 * 60.0 + 118.0);
    }

    #[test]
    fn test_payload_accessors_on_block_only_shape() {
        let payload = WorkoutPayload::AerobicPower {
            blocks: vec![block(8.0, 2000.0)],
        };
        assert!(payload.segments().is_empty());
        assert_eq!(payload.blocks().len(), 1);
        assert_eq!(payload.category(), Category::AerobicPower);
    }

    #[test]
    fn test_category_block_kind() {
        assert_eq!(Category::Intervals.block_kind(), None);
        assert_eq!(Category::Fartlek.block_kind(), Some(BlockKind::Fartlek));
        assert_eq!(
            Category::AerobicPowerIntervals.block_kind(),
            Some(BlockKind::AerobicPower)
        );
        assert!(Category::FartlekIntervals.has_segments());
        assert!(!Category::AerobicPower.has_segments());
    }

    #[test]
    fn test_category_from_str() {
        use std::str::FromStr;
        assert_eq!(Category::from_str("intervals").unwrap(), Category::Intervals);
        assert_eq!(Category::from_str("Fartlek").unwrap(), Category::Fartlek);
        assert_eq!(
            Category::from_str("aerobic-power-intervals").unwrap(),
            Category::AerobicPowerIntervals
        );
        assert!(Category::from_str("tempo").is_err());
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_total_duration_is_order_independent(
            times in prop::collection::vec(1u32..600u32, 1..20)
        ) {
            // whole-second times keep the f64 sums exact
            let forward: Vec<Segment> = times.iter().map(|&t| segment(400.0, t as f64)).collect();
            let mut reversed = forward.clone();
            reversed.reverse();

            let a = record(WorkoutPayload::Intervals { segments: forward });
            let b = record(WorkoutPayload::Intervals { segments: reversed });

            prop_assert_eq!(a.total_duration_seconds(), b.total_duration_seconds());
            prop_assert_eq!(
                a.total_duration_seconds(),
                times.iter().map(|&t| t as f64).sum::<f64>()
            );
        }
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let rec = record(WorkoutPayload::FartlekIntervals {
            blocks: vec![block(10.0, 2500.0)],
            segments: vec![segment(400.0, 90.0)],
        });

        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"category\":\"fartlek_intervals\""));

        let deserialized: WorkoutRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, rec);
    }
}
