use munificent_interaction::{ComparisonSlider, RawPointerEvent, Rect, SliderConfig};
use munificent_test_fixtures::drags;
use serde::Deserialize;

#[derive(Deserialize)]
struct DragTrace {
    bounds: Rect,
    steps: Vec<DragStep>,
}

#[derive(Deserialize)]
struct DragStep {
    event: RawPointerEvent,
    expect: f32,
}

fn replay(name: &str) {
    let trace: DragTrace = drags::load(name).expect("drag fixture loads");
    let mut slider = ComparisonSlider::new(SliderConfig::default()).unwrap();
    slider.mount(trace.bounds);
    for (i, step) in trace.steps.iter().enumerate() {
        slider.handle_raw(step.event);
        let position = slider.position();
        assert!(
            (0.0..=100.0).contains(&position),
            "{name} step {i}: position {position} out of range"
        );
        assert!(
            (position - step.expect).abs() < 1e-4,
            "{name} step {i}: expected {} got {position}",
            step.expect
        );
    }
    assert!(!slider.is_dragging(), "{name}: drag should end released");
}

#[test]
fn overshooting_drag_clamps_at_both_edges() {
    replay("overshoot");
}

#[test]
fn hybrid_device_double_delivery_is_idempotent() {
    replay("hybrid-device");
}

#[test]
fn unlaid_container_never_produces_nan() {
    replay("unlaid-container");
}

#[test]
fn every_drag_fixture_replays() {
    for key in drags::keys() {
        replay(&key);
    }
}
