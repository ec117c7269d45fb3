//! Stroke-to-intent behavior of the gesture recognizer: edge swipes,
//! pull-to-refresh commit/cancel and the context guards.

use std::time::Duration;

use alistui::gesture::{GestureConfig, GestureContext, GestureEvent, GestureRecognizer};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn ctx() -> GestureContext {
    GestureContext {
        at_top: true,
        selection_mode: false,
        refreshing: false,
        over_item: Some(2),
    }
}

#[test]
fn fast_edge_swipe_goes_back() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.pointer_down(10.0, 300.0, ms(0), ctx());
    recognizer.pointer_move(80.0, 302.0, ms(120));
    assert_eq!(
        recognizer.pointer_up(150.0, 305.0, ms(300)),
        Some(GestureEvent::Back)
    );
}

#[test]
fn swipe_from_mid_screen_is_not_back() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    // Same motion, but starting at x=200 instead of the edge margin
    recognizer.pointer_down(200.0, 300.0, ms(0), ctx());
    recognizer.pointer_move(280.0, 302.0, ms(120));
    assert_eq!(recognizer.pointer_up(340.0, 305.0, ms(300)), None);
}

#[test]
fn slow_edge_drag_is_not_back() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.pointer_down(10.0, 300.0, ms(0), ctx());
    recognizer.pointer_move(80.0, 302.0, ms(400));
    // 700ms exceeds the 500ms swipe window
    assert_eq!(recognizer.pointer_up(150.0, 305.0, ms(700)), None);
}

#[test]
fn diagonal_edge_stroke_is_not_back() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.pointer_down(10.0, 100.0, ms(0), ctx());
    recognizer.pointer_move(70.0, 145.0, ms(100));
    // dx 120 but dy 90: more of a scroll than a swipe
    assert_eq!(recognizer.pointer_up(130.0, 190.0, ms(200)), None);
}

#[test]
fn edge_swipe_disabled_in_selection_mode() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    let selection_ctx = GestureContext {
        selection_mode: true,
        ..ctx()
    };
    recognizer.pointer_down(10.0, 300.0, ms(0), selection_ctx);
    recognizer.pointer_move(80.0, 302.0, ms(120));
    assert_eq!(recognizer.pointer_up(150.0, 305.0, ms(300)), None);
}

#[test]
fn deep_pull_commits_a_refresh_on_release() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.pointer_down(200.0, 100.0, ms(0), ctx());

    // 150 rows of drag damps to ~110, past the 100 trigger
    match recognizer.pointer_move(200.0, 250.0, ms(150)) {
        Some(GestureEvent::PullChanged { armed, .. }) => assert!(armed),
        other => panic!("expected armed pull, got {:?}", other),
    }
    assert_eq!(
        recognizer.pointer_up(200.0, 250.0, ms(200)),
        Some(GestureEvent::RefreshRequested)
    );
}

#[test]
fn shallow_pull_cancels_on_release() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.pointer_down(200.0, 100.0, ms(0), ctx());

    // 60 rows damps to ~53, short of the trigger
    match recognizer.pointer_move(200.0, 160.0, ms(150)) {
        Some(GestureEvent::PullChanged { armed, .. }) => assert!(!armed),
        other => panic!("expected unarmed pull, got {:?}", other),
    }
    assert_eq!(
        recognizer.pointer_up(200.0, 160.0, ms(200)),
        Some(GestureEvent::PullCancelled)
    );
}

#[test]
fn pull_then_push_back_up_cancels() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.pointer_down(200.0, 100.0, ms(0), ctx());
    recognizer.pointer_move(200.0, 250.0, ms(100));
    recognizer.pointer_move(200.0, 130.0, ms(200));
    assert_eq!(
        recognizer.pointer_up(200.0, 130.0, ms(250)),
        Some(GestureEvent::PullCancelled)
    );
}

#[test]
fn cell_scaled_config_keeps_proportions() {
    let cells = GestureConfig::for_cells();
    let pixels = GestureConfig::default();
    // Terminal cells are coarser, so every threshold shrinks
    assert!(cells.edge_margin < pixels.edge_margin);
    assert!(cells.swipe_min_dx < pixels.swipe_min_dx);
    assert!(cells.pull_trigger < pixels.pull_trigger);
    assert!(cells.pull_max > cells.pull_trigger);
    // Time thresholds are device-independent and stay put
    assert_eq!(cells.swipe_max_duration, pixels.swipe_max_duration);
    assert_eq!(cells.long_press, pixels.long_press);
}

#[test]
fn tap_resolves_to_the_row_under_the_pointer() {
    let mut recognizer = GestureRecognizer::new(GestureConfig::default());
    recognizer.pointer_down(120.0, 42.0, ms(0), ctx());
    assert_eq!(
        recognizer.pointer_up(121.0, 42.0, ms(90)),
        Some(GestureEvent::Tap { index: 2 })
    );

    // A press that starts off the rows resolves to nothing
    let off_rows = GestureContext {
        over_item: None,
        ..ctx()
    };
    recognizer.pointer_down(120.0, 42.0, ms(200), off_rows);
    assert_eq!(recognizer.pointer_up(120.0, 42.0, ms(280)), None);
}
