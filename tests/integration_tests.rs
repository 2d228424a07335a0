use intervalog::builder::{build_block, build_segment, build_workout_record};
use intervalog::export::csv::{export_collection_csv, export_workout_csv};
use intervalog::export::text::export_workout_report;
use intervalog::models::{BlockKind, Category, Weekday, WorkoutRecord};
use intervalog::stats::compute_stats;
use intervalog::store::WorkoutStore;

use tempfile::TempDir;

/// Integration tests that exercise the complete record-build, persist,
/// aggregate, and export workflows

fn interval_workout(athlete: &str, segment_count: usize) -> WorkoutRecord {
    let segments = (0..segment_count)
        .map(|_| build_segment("400", "1", "30", "1", "0", "").unwrap())
        .collect();
    build_workout_record(
        athlete,
        Weekday::Tuesday,
        Category::Intervals,
        segments,
        Vec::new(),
        Vec::new(),
    )
    .unwrap()
}

fn power_workout(athlete: &str) -> WorkoutRecord {
    let blocks = vec![build_block(BlockKind::AerobicPower, "12", "3000", "even").unwrap()];
    build_workout_record(
        athlete,
        Weekday::Thursday,
        Category::AerobicPower,
        Vec::new(),
        Vec::new(),
        blocks,
    )
    .unwrap()
}

/// Workaround for the millisecond-derived id: two records built in the same
/// millisecond would collide in the store, so retag them per test.
fn with_id(mut record: WorkoutRecord, id: &str) -> WorkoutRecord {
    record.id = id.to_string();
    record
}

#[test]
fn test_build_persist_and_reload_workflow() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workouts.json");

    let mut store = WorkoutStore::load(&path).unwrap();
    store.append(with_id(interval_workout("Ana", 3), "1")).unwrap();
    store.append(with_id(power_workout("Ben"), "2")).unwrap();

    let reloaded = WorkoutStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 2);

    let first = reloaded.find("1").unwrap();
    assert_eq!(first.athlete, "Ana");
    assert_eq!(first.category(), Category::Intervals);
    assert_eq!(first.payload.segments().len(), 3);
    assert_eq!(first.total_duration_seconds(), 270.0);

    let second = reloaded.find("2").unwrap();
    assert_eq!(second.category(), Category::AerobicPower);
    assert_eq!(second.total_duration_seconds(), 720.0);
}

#[test]
fn test_stats_over_persisted_collection() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workouts.json");

    let mut store = WorkoutStore::load(&path).unwrap();
    store.append(with_id(interval_workout("Ana", 3), "1")).unwrap();
    store.append(with_id(interval_workout("ana ", 2), "2")).unwrap();
    store.append(with_id(power_workout("Ben"), "3")).unwrap();

    let stats = compute_stats(store.workouts());
    assert_eq!(stats.total_workouts, 3);
    assert_eq!(stats.total_segments, 5);
    assert_eq!(stats.aerobic_power_workouts, 1);
    assert_eq!(stats.fartlek_workouts, 0);
    // "Ana" and "ana " are the same athlete
    assert_eq!(stats.distinct_athletes, 2);
}

#[test]
fn test_rejected_input_leaves_store_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("workouts.json");

    let mut store = WorkoutStore::load(&path).unwrap();
    store.append(with_id(interval_workout("Ana", 1), "1")).unwrap();

    // combined category with an empty segment list never becomes a record
    let result = build_workout_record(
        "Ana",
        Weekday::Friday,
        Category::FartlekIntervals,
        Vec::new(),
        vec![build_block(BlockKind::Fartlek, "10", "2500", "easy").unwrap()],
        Vec::new(),
    );
    assert!(result.is_err());

    let reloaded = WorkoutStore::load(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
}

#[test]
fn test_collection_csv_export() {
    let dir = TempDir::new().unwrap();
    let records = vec![
        with_id(interval_workout("Ana", 2), "1"),
        with_id(power_workout("Ben"), "2"),
    ];

    let out = dir.path().join("workouts.csv");
    export_collection_csv(&records, &out).unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF".as_slice());

    let content = String::from_utf8_lossy(&bytes[3..]).to_string();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,Ana,Tuesday,Intervals,2,0,"));
    assert!(lines[2].starts_with("2,Ben,Thursday,Aerobic power,0,1,12:00"));
}

#[test]
fn test_workout_detail_csv_quotes_awkward_notes() {
    let dir = TempDir::new().unwrap();
    let segments = vec![build_segment("400", "1", "30", "1", "0", "last one, \"empty the tank\"").unwrap()];
    let record = build_workout_record(
        "Ana",
        Weekday::Sunday,
        Category::Intervals,
        segments,
        Vec::new(),
        Vec::new(),
    )
    .unwrap();

    let out = dir.path().join("detail.csv");
    export_workout_csv(&record, &out).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"last one, \"\"empty the tank\"\"\""));
}

#[test]
fn test_text_report_export() {
    let dir = TempDir::new().unwrap();
    let record = with_id(power_workout("Ben"), "2");

    let out = dir.path().join("report.txt");
    export_workout_report(&record, &out).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("WORKOUT REPORT"));
    assert!(content.contains("Athlete:  Ben"));
    assert!(content.contains("AEROBIC POWER BLOCKS"));
    assert!(content.contains("Total duration: 12:00"));
}
