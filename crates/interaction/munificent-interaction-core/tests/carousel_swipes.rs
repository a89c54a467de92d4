use munificent_interaction::{CarouselConfig, SwipeCarousel, SwipeDirection, SwipeOutcome};
use munificent_test_fixtures::swipes;
use serde::Deserialize;

#[derive(Deserialize)]
struct SwipeSession {
    slides: usize,
    gestures: Vec<Gesture>,
}

#[derive(Deserialize)]
struct Gesture {
    start: f32,
    moves: Vec<f32>,
    expect_index: usize,
}

fn replay(name: &str) {
    let session: SwipeSession = swipes::load(name).expect("swipe fixture loads");
    let mut carousel = SwipeCarousel::new(session.slides, CarouselConfig::default()).unwrap();
    for (i, g) in session.gestures.iter().enumerate() {
        carousel.touch_start(g.start);
        for &x in &g.moves {
            carousel.touch_move(x);
        }
        carousel.touch_end();
        assert_eq!(
            carousel.active_index(),
            g.expect_index,
            "{name} gesture {i}"
        );
        assert_eq!(carousel.touch_points(), (None, None));
    }
}

#[test]
fn swipe_fixtures_replay() {
    for key in swipes::keys() {
        replay(&key);
    }
}

#[test]
fn forty_px_is_ignored_sixty_px_moves_once() {
    let mut c = SwipeCarousel::new(5, CarouselConfig::default()).unwrap();
    c.go_to(2);

    c.touch_start(200.0);
    c.touch_move(160.0);
    assert!(matches!(c.touch_end(), SwipeOutcome::BelowThreshold { .. }));
    assert_eq!(c.active_index(), 2);

    c.touch_start(200.0);
    c.touch_move(140.0);
    assert_eq!(
        c.touch_end(),
        SwipeOutcome::Committed {
            direction: SwipeDirection::Next,
            index: 3
        }
    );

    c.touch_start(140.0);
    c.touch_move(200.0);
    assert_eq!(
        c.touch_end(),
        SwipeOutcome::Committed {
            direction: SwipeDirection::Previous,
            index: 2
        }
    );
}

#[test]
fn gesture_leaving_the_track_resolves_on_last_recorded_move() {
    // Host stops delivering moves once the finger leaves the track; the
    // gesture still resolves without any cancellation.
    let mut c = SwipeCarousel::new(3, CarouselConfig::default()).unwrap();
    c.touch_start(300.0);
    c.touch_move(240.0);
    let outcome = c.touch_end();
    assert!(matches!(outcome, SwipeOutcome::Committed { index: 1, .. }));
}

#[test]
fn custom_threshold() {
    let cfg = CarouselConfig {
        swipe_threshold_px: 100.0,
        ..CarouselConfig::default()
    };
    let mut c = SwipeCarousel::new(3, cfg).unwrap();
    c.touch_start(300.0);
    c.touch_move(230.0);
    c.touch_end();
    assert_eq!(c.active_index(), 0);
}

/// Small deterministic generator so sequences are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

#[test]
fn index_stays_in_range_for_any_sequence() {
    let mut rng = Lcg(7);
    for n in 1..=6usize {
        let mut c = SwipeCarousel::new(n, CarouselConfig::default()).unwrap();
        for _ in 0..500 {
            match rng.next() % 5 {
                0 => {
                    c.next();
                }
                1 => {
                    c.prev();
                }
                2 => {
                    c.go_to((rng.next() % 10) as usize);
                }
                3 => {
                    let start = (rng.next() % 400) as f32;
                    c.touch_start(start);
                    c.touch_move((rng.next() % 400) as f32);
                    c.touch_end();
                }
                _ => {
                    c.touch_start((rng.next() % 400) as f32);
                }
            }
            assert!(c.active_index() < n, "index {} with {n} slides", c.active_index());
        }
    }
}

#[test]
fn wrap_identities() {
    for n in 1..=5usize {
        let mut c = SwipeCarousel::new(n, CarouselConfig::default()).unwrap();
        c.go_to(n - 1);
        assert_eq!(c.next(), 0);
        assert_eq!(c.prev(), n - 1);
    }
}
