//! CSS timing functions, sampled headlessly.
//!
//! Adapters hand the CSS form to the browser; the core samples the same
//! cubic-bezier curve so trailing and slide timing stay testable natively.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Control points (x1, y1, x2, y2).
    CubicBezier([f32; 4]),
}

impl Easing {
    pub fn control_points(&self) -> [f32; 4] {
        match self {
            Easing::Linear => [0.0, 0.0, 1.0, 1.0],
            Easing::Ease => [0.25, 0.1, 0.25, 1.0],
            Easing::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Easing::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Easing::EaseInOut => [0.42, 0.0, 0.58, 1.0],
            Easing::CubicBezier(ctrl) => *ctrl,
        }
    }

    /// Eased progress for linear progress `t` (clamped to [0,1]).
    #[inline]
    pub fn sample(&self, t: f32) -> f32 {
        let [x1, y1, x2, y2] = self.control_points();
        bezier_ease_t(t, x1, y1, x2, y2)
    }

    /// CSS `<easing-function>` form.
    pub fn css(&self) -> String {
        match self {
            Easing::Linear => "linear".into(),
            Easing::Ease => "ease".into(),
            Easing::EaseIn => "ease-in".into(),
            Easing::EaseOut => "ease-out".into(),
            Easing::EaseInOut => "ease-in-out".into(),
            Easing::CubicBezier([x1, y1, x2, y2]) => {
                format!("cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Cubic Bezier basis function
#[inline]
fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Given control points (x1, y1, x2, y2) and an input t in [0,1],
/// compute the eased y by inverting the x bezier via binary search.
#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if !t.is_finite() {
        return if t > 0.0 { 1.0 } else { 0.0 };
    }
    let t = t.clamp(0.0, 1.0);
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return t;
    }
    // Endpoints are exact for every CSS curve.
    if t == 0.0 || t == 1.0 {
        return t;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = t;
    for _ in 0..24 {
        let x = cubic_bezier(0.0, x1, x2, 1.0, mid);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    cubic_bezier(0.0, y1, y2, 1.0, mid)
}

/// Duration plus timing function, as used by CSS transitions and
/// `Element.animate`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
}

impl TransitionSpec {
    pub const fn new(duration_ms: u32, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
        }
    }

    /// Linear progress through the transition `elapsed_ms` after it started.
    #[inline]
    pub fn progress(&self, elapsed_ms: f64) -> f32 {
        if self.duration_ms == 0 || !elapsed_ms.is_finite() {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms as f64).clamp(0.0, 1.0) as f32
    }

    /// Eased point between `from` and `to` after `elapsed_ms`.
    pub fn interpolate(&self, from: Point, to: Point, elapsed_ms: f64) -> Point {
        let k = self.easing.sample(self.progress(elapsed_ms));
        Point::new(lerp_f32(from.x, to.x, k), lerp_f32(from.y, to.y, k))
    }

    /// CSS `transition` shorthand for one property, e.g. `transform 500ms ease-out`.
    pub fn css(&self, property: &str) -> String {
        format!("{property} {}ms {}", self.duration_ms, self.easing.css())
    }
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn linear_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_abs_diff_eq!(Easing::Linear.sample(t), t, epsilon = 1e-6);
        }
    }

    #[test]
    fn curves_hit_endpoints_and_stay_monotonic() {
        for easing in [Easing::Ease, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.sample(0.0), 0.0);
            assert_eq!(easing.sample(1.0), 1.0);
            let mut prev = 0.0;
            for i in 1..=50 {
                let y = easing.sample(i as f32 / 50.0);
                assert!(y + 1e-4 >= prev, "{easing:?} not monotonic at step {i}");
                prev = y;
            }
        }
    }

    #[test]
    fn ease_out_runs_ahead_of_linear() {
        assert!(Easing::EaseOut.sample(0.3) > 0.3);
        assert!(Easing::EaseIn.sample(0.3) < 0.3);
    }

    #[test]
    fn sample_clamps_out_of_range_input() {
        assert_eq!(Easing::Ease.sample(-2.0), 0.0);
        assert_eq!(Easing::Ease.sample(3.0), 1.0);
        assert_eq!(Easing::Ease.sample(f32::NAN), 0.0);
    }

    #[test]
    fn css_forms() {
        assert_eq!(
            TransitionSpec::new(500, Easing::EaseOut).css("transform"),
            "transform 500ms ease-out"
        );
        assert_eq!(
            Easing::CubicBezier([0.1, 0.2, 0.3, 0.4]).css(),
            "cubic-bezier(0.1, 0.2, 0.3, 0.4)"
        );
    }

    #[test]
    fn interpolate_reaches_target_at_duration() {
        let spec = TransitionSpec::new(200, Easing::Ease);
        let from = Point::new(0.0, 0.0);
        let to = Point::new(100.0, 50.0);
        assert_eq!(spec.interpolate(from, to, 0.0), from);
        assert_eq!(spec.interpolate(from, to, 200.0), to);
        assert_eq!(spec.interpolate(from, to, 1_000.0), to);
        let mid = spec.interpolate(from, to, 100.0);
        assert!(mid.x > 0.0 && mid.x < 100.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let spec = TransitionSpec::new(0, Easing::Ease);
        assert_eq!(spec.progress(0.0), 1.0);
    }

    #[test]
    fn serde_kebab_case() {
        let json = serde_json::to_string(&Easing::EaseOut).unwrap();
        assert_eq!(json, "\"ease-out\"");
        let spec: TransitionSpec = serde_json::from_str(r#"{"duration_ms":200}"#).unwrap();
        assert_eq!(spec.easing, Easing::Ease);
    }

    #[test]
    fn default_easing_is_css_ease() {
        assert_eq!(Easing::default(), Easing::Ease);
        assert_eq!(Easing::default().css(), "ease");
    }
}
