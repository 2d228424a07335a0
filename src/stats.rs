//! Aggregate statistics over a workout collection
//!
//! A single fold over a snapshot of the store; the collection itself is
//! never mutated here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{BlockKind, WorkoutRecord};

/// Summary counts for a workout collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStats {
    /// Total number of recorded workouts
    pub total_workouts: usize,

    /// Interval segments across all records (block-only shapes contribute 0)
    pub total_segments: usize,

    /// Workouts carrying fartlek blocks, solo or combined
    pub fartlek_workouts: usize,

    /// Workouts carrying aerobic-power blocks, solo or combined
    pub aerobic_power_workouts: usize,

    /// Distinct athlete names, compared case-insensitively after trimming
    pub distinct_athletes: usize,
}

/// Fold a collection snapshot into summary counts.
pub fn compute_stats(workouts: &[WorkoutRecord]) -> TrainingStats {
    let mut stats = TrainingStats {
        total_workouts: workouts.len(),
        ..TrainingStats::default()
    };

    let mut athletes: HashSet<String> = HashSet::new();
    for record in workouts {
        stats.total_segments += record.payload.segments().len();
        match record.category().block_kind() {
            Some(BlockKind::Fartlek) => stats.fartlek_workouts += 1,
            Some(BlockKind::AerobicPower) => stats.aerobic_power_workouts += 1,
            None => {}
        }
        athletes.insert(record.athlete.trim().to_lowercase());
    }
    stats.distinct_athletes = athletes.len();

    stats
}
