//! Pace derivation and duration formatting
//!
//! Normalizes timed efforts of different lengths into comparable figures:
//! pace per 100 m for interval segments (with an extrapolated 800 m estimate)
//! and a per-kilometer pace for continuous blocks.

use crate::models::{Block, Segment};

/// Reference distance for segment pace normalization, in meters
pub const REFERENCE_DISTANCE_M: f64 = 100.0;

/// The 800 m estimate is modeled as 8x the 100 m pace
const REFERENCE_MULTIPLIER_800M: f64 = 8.0;

/// Sentinel shown when a block pace cannot be derived
pub const PACE_UNAVAILABLE: &str = "N/A";

/// Derived pace figures for one interval segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPace {
    /// Seconds needed per 100 m at the segment's speed
    pub per_100m: f64,

    /// Extrapolated 800 m time in seconds
    pub estimated_800m: f64,
}

/// Format a duration in seconds as "MM:SS".
///
/// NaN or negative input renders as "00:00". Minutes are floored and the
/// remainder rounded to whole seconds, carrying into the minute when the
/// remainder rounds up to 60.
pub fn format_duration(seconds: f64) -> String {
    if seconds.is_nan() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let mut minutes = (seconds / 60.0).floor() as u64;
    let mut remainder = (seconds - minutes as f64 * 60.0).round() as u64;
    if remainder == 60 {
        minutes += 1;
        remainder = 0;
    }

    format!("{:02}:{:02}", minutes, remainder)
}

/// Derive the per-100 m pace and 800 m estimate for a segment.
///
/// Builder-validated segments always have distance > 0. If an unvalidated
/// segment arrives with a non-positive distance the pace is 0 by policy
/// rather than a division fault.
pub fn segment_pace(segment: &Segment) -> SegmentPace {
    if segment.distance_m <= 0.0 {
        return SegmentPace {
            per_100m: 0.0,
            estimated_800m: 0.0,
        };
    }

    let per_100m = segment.time_s / segment.distance_m * REFERENCE_DISTANCE_M;
    SegmentPace {
        per_100m,
        estimated_800m: per_100m * REFERENCE_MULTIPLIER_800M,
    }
}

/// Derive a block's pace per kilometer as a formatted "MM:SS" string,
/// or the "N/A" sentinel when the distance is not positive.
pub fn block_pace(block: &Block) -> String {
    if block.distance_m > 0.0 {
        format_duration(block.time_min * 60.0 / (block.distance_m / 1000.0))
    } else {
        PACE_UNAVAILABLE.to_string()
    }
}
