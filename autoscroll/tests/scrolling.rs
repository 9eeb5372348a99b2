use autoscroll::{
    keys,
    sim::{Region, Simulation},
    CursorShape, GestureKind, InputEvent, Modifiers, MouseButton, Point, ScrollMode, ScrollSpeed,
    Settings, SpeedAlgorithm,
};
use std::time::Duration;

const START: Point = Point::new(100, 100);

fn simulation(settings: Settings) -> Simulation {
    autoscroll_log::test();
    Simulation::new(settings, Region::default(), 1_000_000)
}

fn press(at: Point) -> InputEvent {
    InputEvent::press(MouseButton::Middle, at)
}

fn release(at: Point) -> InputEvent {
    InputEvent::release(MouseButton::Middle, at)
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn assert_close(actual: i32, expected: f64) {
    assert!(
        (f64::from(actual) - expected).abs() <= 1.0,
        "scrolled {actual}, expected {expected:.2}"
    );
}

#[test]
fn scrolls_distance_matching_velocity_for_each_curve() {
    for algorithm in [SpeedAlgorithm::Gecko, SpeedAlgorithm::Quadratic] {
        let curve = algorithm.curve(1.0);
        let mut sim = simulation(Settings {
            speed: algorithm,
            scroll_mode: ScrollMode::Both,
            ..Settings::default()
        });

        sim.dispatch(&press(START));
        sim.dispatch(&InputEvent::mouse_move(Point::new(100, 113)));
        sim.advance(millis(1_000));
        assert_close(sim.offsets().y, curve.speed(13));

        let before = sim.offsets().y;
        sim.dispatch(&InputEvent::mouse_move(Point::new(100, 200)));
        let ticks = sim.ticks();
        sim.advance(millis(500));
        assert_eq!(sim.ticks() - ticks, 50);
        assert_close(sim.offsets().y - before, curve.speed(100) * 0.5);
        assert_eq!(sim.offsets().x, 0);
    }
}

#[test]
fn curves_disagree_just_outside_dead_zone() {
    let mut gecko = simulation(Settings::default());
    let mut quadratic = simulation(Settings {
        speed: SpeedAlgorithm::Quadratic,
        ..Settings::default()
    });

    for sim in [&mut gecko, &mut quadratic] {
        sim.dispatch(&press(START));
        sim.dispatch(&InputEvent::mouse_move(Point::new(100, 113)));
        sim.advance(millis(2_000));
    }

    assert!(gecko.offsets().y >= 12);
    assert_eq!(gecko.cursor(), Some(CursorShape::ResizeS));
    assert_eq!(quadratic.offsets().y, 0);
    assert_eq!(quadratic.cursor(), Some(CursorShape::Move));
}

#[test]
fn upward_displacement_scrolls_up() {
    let mut sim = simulation(Settings::default());
    sim.dispatch(&press(Point::new(100, 500)));
    sim.advance(millis(50));
    sim.dispatch(&release(Point::new(100, 500)));
    // Scroll down first so there is room to go back up.
    sim.dispatch(&InputEvent::mouse_move(Point::new(100, 700)));
    sim.advance(millis(1_000));
    let bottom = sim.offsets().y;

    sim.dispatch(&InputEvent::mouse_move(Point::new(100, 400)));
    assert_eq!(sim.cursor(), Some(CursorShape::ResizeN));
    sim.advance(millis(100));
    assert!(sim.offsets().y < bottom);
}

#[test]
fn extreme_cursor_position_scrolls_up_without_overflow() {
    let mut sim = simulation(Settings::default());
    sim.dispatch(&press(START));
    sim.advance(millis(50));
    sim.dispatch(&release(START));
    sim.dispatch(&InputEvent::mouse_move(Point::new(100, 600)));
    sim.advance(millis(500));
    let bottom = sim.offsets().y;
    assert!(bottom > 0);

    sim.dispatch(&InputEvent::mouse_move(Point::new(100, i32::MIN)));
    assert!(sim.is_active());
    assert_eq!(sim.cursor(), Some(CursorShape::ResizeN));
    sim.advance(millis(20));
    assert!(sim.offsets().y < bottom);
    assert!(sim.is_active());
}

#[test]
fn only_one_gesture_at_a_time() {
    let mut sim = simulation(Settings::default());
    sim.dispatch(&press(START));
    sim.advance(millis(20));
    sim.dispatch(&release(START));
    assert!(sim.is_active());
    assert_eq!(sim.pending_timers(), 1);

    // The next press ends the live gesture instead of stacking a second one.
    assert!(sim.dispatch(&press(Point::new(300, 300))));
    assert!(!sim.is_active());
    assert_eq!(sim.pending_timers(), 0);

    assert!(sim.dispatch(&press(Point::new(300, 300))));
    assert!(sim.is_active());
    assert_eq!(sim.pending_timers(), 1);
}

#[test]
fn escape_stops_scrolling_and_restores_cursor() {
    let mut sim = simulation(Settings::default());
    sim.dispatch(&press(START));
    sim.dispatch(&InputEvent::mouse_move(Point::new(100, 300)));
    sim.advance(millis(200));
    let stopped_at = sim.offsets();
    assert!(stopped_at.y > 0);

    assert!(sim.dispatch(&InputEvent::key_down(keys::ESCAPE)));
    assert_eq!(sim.cursor(), None);
    assert_eq!(sim.pending_timers(), 0);

    sim.advance(millis(1_000));
    assert_eq!(sim.offsets(), stopped_at);
}

#[test]
fn quick_release_enters_toggle_mode() {
    let mut sim = simulation(Settings::default());
    assert!(sim.dispatch(&press(START)));
    sim.advance(millis(100));
    assert!(sim.dispatch(&release(START)));
    assert!(sim.is_active());

    // Plain movement steers the toggled gesture.
    assert!(!sim.dispatch(&InputEvent::mouse_move(Point::new(100, 250))));
    sim.advance(millis(300));
    assert!(sim.offsets().y > 0);

    assert!(sim.dispatch(&press(Point::new(100, 250))));
    assert!(!sim.is_active());
    assert_eq!(sim.cursor(), None);
}

#[test]
fn slow_release_ends_gesture() {
    let mut sim = simulation(Settings::default());
    sim.dispatch(&press(START));
    sim.advance(millis(301));
    assert!(sim.dispatch(&release(START)));
    assert!(!sim.is_active());
    assert_eq!(sim.cursor(), None);
}

#[test]
fn hold_mode_scrolls_only_while_held() {
    let mut sim = simulation(Settings {
        click_to_drag_toggle: false,
        ..Settings::default()
    });
    assert!(!sim.dispatch(&press(START)));
    assert!(sim.dispatch(&InputEvent::drag(Point::new(100, 200))));
    sim.advance(millis(250));
    assert!(sim.dispatch(&release(Point::new(100, 200))));
    let released_at = sim.offsets();
    assert!(released_at.y > 0);

    sim.advance(millis(250));
    assert_eq!(sim.offsets(), released_at);
    assert!(!sim.is_active());
}

#[test]
fn disabled_mode_passes_everything_through() {
    let mut sim = simulation(Settings {
        scroll_mode: ScrollMode::Disabled,
        ..Settings::default()
    });
    assert!(!sim.dispatch(&press(START)));
    assert!(!sim.dispatch(&InputEvent::drag(Point::new(100, 300))));
    assert!(!sim.dispatch(&release(Point::new(100, 300))));
    assert!(!sim.dispatch(&InputEvent::click(MouseButton::Middle, START)));
    sim.advance(millis(500));
    assert_eq!(sim.offsets(), Point::new(0, 0));
    assert_eq!(sim.cursor(), None);
    assert_eq!(sim.pending_timers(), 0);
}

#[test]
fn both_mode_scrolls_diagonally() {
    let mut sim = simulation(Settings {
        scroll_mode: ScrollMode::Both,
        ..Settings::default()
    });
    sim.dispatch(&press(START));
    sim.dispatch(&InputEvent::mouse_move(Point::new(200, 200)));
    assert_eq!(sim.cursor(), Some(CursorShape::ResizeSE));
    sim.advance(millis(1_000));
    let offsets = sim.offsets();
    assert_eq!(offsets.x, offsets.y);
    assert!(offsets.x > 0);
}

#[test]
fn hiding_or_blurring_ends_gesture() {
    let mut sim = simulation(Settings::default());
    sim.dispatch(&press(START));
    assert!(sim.hide());
    assert!(!sim.is_active());
    assert!(!sim.hide());

    sim.dispatch(&press(START));
    assert!(sim.blur());
    assert!(!sim.is_active());
    assert_eq!(sim.cursor(), None);
}

#[test]
fn press_outside_pane_is_left_to_host() {
    autoscroll_log::test();
    let region = Region::new(Point::new(0, 0), 400, 400);
    let mut sim = Simulation::new(Settings::default(), region, 10_000);
    assert!(!sim.dispatch(&press(Point::new(800, 100))));
    assert!(!sim.dispatch(&InputEvent::click(MouseButton::Middle, Point::new(800, 100))));
    assert!(!sim.is_active());
}

#[test]
fn scrolling_stops_at_the_end_of_the_range() {
    autoscroll_log::test();
    let mut sim = Simulation::new(Settings::default(), Region::default(), 250);
    sim.dispatch(&press(START));
    sim.dispatch(&InputEvent::mouse_move(Point::new(100, 400)));
    sim.advance(millis(2_000));
    assert_eq!(sim.offsets().y, 250);
    assert!(sim.is_active());
}

#[test]
fn pan_gesture_tracks_drag_exactly() {
    let mut sim = simulation(Settings {
        gesture: GestureKind::Pan,
        scroll_mode: ScrollMode::Both,
        click_to_drag_toggle: false,
        ..Settings::default()
    });
    sim.dispatch(&press(START));
    sim.dispatch(&InputEvent::drag(Point::new(110, 140)));
    sim.dispatch(&InputEvent::drag(Point::new(130, 160)));
    sim.advance(millis(1_000));
    assert_eq!(sim.offsets(), Point::new(30, 60));
    assert_eq!(sim.ticks(), 0);
    assert!(sim.dispatch(&release(Point::new(130, 160))));
    assert!(!sim.is_active());
}

#[test]
fn live_settings_reach_the_next_gesture() {
    let mut sim = simulation(Settings::default());
    sim.settings().update(|s| s.activation = "shift+middle".parse().unwrap());
    assert!(!sim.dispatch(&press(START)));
    assert!(!sim.is_active());

    let shifted = press(START).with_modifiers(Modifiers {
        shift: true,
        ..Modifiers::NONE
    });
    assert!(sim.dispatch(&shifted));
    assert!(sim.is_active());
}
