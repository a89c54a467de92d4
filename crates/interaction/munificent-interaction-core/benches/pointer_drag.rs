use criterion::{black_box, criterion_group, criterion_main, Criterion};
use munificent_interaction::{
    ComparisonSlider, InputPhase, Point, RawPointerEvent, Rect, SliderConfig,
};

fn bench_drag(c: &mut Criterion) {
    let mut slider = ComparisonSlider::new(SliderConfig::default()).unwrap();
    slider.mount(Rect::new(0.0, 0.0, 1280.0, 720.0));
    slider.handle_raw(RawPointerEvent::Mouse {
        phase: InputPhase::Start,
        at: Point::new(640.0, 360.0),
    });

    let mut x = 0.0f32;
    c.bench_function("comparison_slider_move", |b| {
        b.iter(|| {
            x = (x + 7.0) % 1400.0;
            black_box(slider.handle_raw(RawPointerEvent::Mouse {
                phase: InputPhase::Move,
                at: Point::new(black_box(x) - 60.0, 360.0),
            }))
        })
    });
}

criterion_group!(benches, bench_drag);
criterion_main!(benches);
