// Library interface for the intervalog modules
// This allows integration tests to access the core functionality

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod pace;
pub mod render;
pub mod stats;
pub mod store;

// Re-export commonly used types for convenience
pub use builder::{
    build_block, build_segment, build_workout_record, duplicate_last_block,
    duplicate_last_segment, DraftBlock, DraftSegment, ValidationError,
};
pub use error::{IntervalogError, Result};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::{
    Block, BlockKind, Category, Segment, Weekday, WorkoutPayload, WorkoutRecord,
};
pub use pace::{block_pace, format_duration, segment_pace, SegmentPace};
pub use render::{render_block_rows, render_segment_rows, render_workout_tables};
pub use stats::{compute_stats, TrainingStats};
pub use store::WorkoutStore;
