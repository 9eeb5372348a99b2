use autoscroll::{CursorShape, Point, ScrollMode, Settings, SpeedAlgorithm};
use autoscroll_bin::{
    commands::replay::{self, replay},
    trace,
};
use std::{fs, time::Duration};
use tempfile::tempdir;

const TOGGLE_TRACE: &str = "\
# click to enter toggle mode, then steer diagonally
0    press middle 100 100
80   release middle 100 100
100  move 200 200
1100 press middle 200 200
";

#[test]
fn replays_trace_with_settings_file() {
    autoscroll_log::test();
    let tmp_dir = tempdir().unwrap();
    let settings_path = tmp_dir.path().join("settings.toml");
    fs::write(
        &settings_path,
        "scroll_mode = \"both\"\nspeed = \"quadratic\"\ndelay_ms = 20\n",
    )
    .unwrap();

    let settings = Settings::load_with_overrides(Some(&settings_path), None).unwrap();
    assert_eq!(settings.scroll_mode, ScrollMode::Both);
    assert_eq!(settings.speed, SpeedAlgorithm::Quadratic);

    let steps = trace::parse(TOGGLE_TRACE).unwrap();
    let report = replay(&steps, settings);

    let consumed: Vec<bool> = report.lines.iter().map(|line| line.consumed).collect();
    assert_eq!(consumed, vec![true, true, false, true]);
    assert_eq!(report.lines[2].cursor, Some(CursorShape::ResizeSE));
    assert_eq!(report.lines[3].cursor, None);

    // Quadratic at 100px: 90^2 / 40 = 202.5 px/s for one second on both axes.
    let Point { x, y } = report.final_offsets;
    assert_eq!(x, y);
    assert!((x - 202).abs() <= 1, "scrolled {x}");
    assert_eq!(report.duration, Duration::from_millis(1100));
    assert_eq!(report.ticks, 55);
}

#[test]
fn hold_mode_trace() {
    autoscroll_log::test();
    let settings = Settings {
        click_to_drag_toggle: false,
        ..Settings::default()
    };
    let steps = trace::parse(
        "0 press middle 50 50\n\
         10 drag 50 150\n\
         510 release middle 50 150\n\
         1000 move 50 400\n",
    )
    .unwrap();
    let report = replay(&steps, settings);

    let consumed: Vec<bool> = report.lines.iter().map(|line| line.consumed).collect();
    assert_eq!(consumed, vec![false, true, true, false]);
    assert!(!report.lines[3].active);
    assert_eq!(report.final_offsets, report.lines[2].offsets);
    assert!(report.final_offsets.y > 0);
}

#[test]
fn run_reports_missing_and_malformed_traces() {
    autoscroll_log::test();
    let tmp_dir = tempdir().unwrap();

    let missing = tmp_dir.path().join("missing.trace");
    let err = replay::run(&missing, Settings::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to read trace file"));

    let bad = tmp_dir.path().join("bad.trace");
    fs::write(&bad, "0 press middle 1 1\n5 tickle\n").unwrap();
    let err = replay::run(&bad, Settings::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse trace file"));
    assert_eq!(err.root_cause().to_string(), "line 2: unknown action 'tickle'");

    let good = tmp_dir.path().join("good.trace");
    fs::write(&good, TOGGLE_TRACE).unwrap();
    replay::run(&good, Settings::default()).unwrap();
}

#[test]
fn coordinates_at_the_edge_of_the_range_keep_scrolling() {
    autoscroll_log::test();
    let steps = trace::parse(
        "0  press middle 100 100\n\
         10 move 100 -2147483648\n\
         20 move 100 2147483647\n",
    )
    .unwrap();
    let report = replay(&steps, Settings::default());

    assert!(report.lines.iter().all(|line| line.active));
    assert_eq!(report.lines[1].cursor, Some(CursorShape::ResizeN));
    assert_eq!(report.lines[2].cursor, Some(CursorShape::ResizeS));
}
