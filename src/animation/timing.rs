//! Easing curves for fixed-duration animations.
//!
//! - [`TimingFunction::Linear`] - Constant speed
//! - [`TimingFunction::EaseIn`] - Starts slow, ends fast
//! - [`TimingFunction::EaseOut`] - Starts fast, ends slow
//! - [`TimingFunction::EaseInOut`] - Slow start and end, fast middle
//! - [`TimingFunction::CubicBezier`] - CSS-style cubic bezier curve

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingFunction {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    /// CSS cubic-bezier curve (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl TimingFunction {
    /// Evaluate the curve at `t` in [0, 1]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            TimingFunction::Linear => t,
            TimingFunction::EaseIn => t * t,
            TimingFunction::EaseOut => t * (2.0 - t),
            TimingFunction::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            TimingFunction::CubicBezier(x1, y1, x2, y2) => cubic_bezier(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// Solves for the curve parameter with Newton-Raphson; assumes x1, x2 in [0, 1]
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let mut current_t = t;
    for _ in 0..8 {
        let current_x = bezier_component(current_t, x1, x2);
        let slope = bezier_slope(current_t, x1, x2);
        if slope.abs() < 1e-6 {
            break;
        }
        current_t -= (current_x - t) / slope;
    }
    bezier_component(current_t, y1, y2)
}

fn bezier_component(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}
