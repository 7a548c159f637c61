//! Core deck model: positions, swipe directions and the viewport-derived
//! metrics that drive the release decision and card rotation.

pub mod deck;
pub mod gesture;

pub use deck::{CardDeck, CardLayer, DeckFrame};
pub use gesture::{GestureEvent, PanTracker};

use crate::config::DeckConfig;
use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};

/// Offset of the top card from its resting layout position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation; `t` may leave [0, 1] for overshoot
    pub fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Horizontal sign of the off-screen target
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Outcome of classifying a released gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    Commit(SwipeDirection),
    Reset,
}

/// Constants derived once from the viewport width.
///
/// Recomputed only when the host reports a new viewport; nothing else
/// re-derives the threshold or the off-screen distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeMetrics {
    pub viewport_width: f32,
    /// Minimum horizontal displacement for a commit
    pub threshold: f32,
    /// Horizontal distance a committed card travels
    pub off_screen_x: f32,
    /// `|x|` at which rotation saturates
    pub rotation_domain: f32,
    pub max_rotation_deg: f32,
}

impl SwipeMetrics {
    pub fn from_viewport(viewport_width: f32, config: &DeckConfig) -> Result<Self> {
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(DeckError::InvalidViewport(viewport_width));
        }

        Ok(Self {
            viewport_width,
            threshold: config.swipe_threshold_ratio * viewport_width,
            off_screen_x: viewport_width,
            rotation_domain: config.rotation_range_ratio * viewport_width,
            max_rotation_deg: config.max_rotation_deg,
        })
    }

    /// Pure threshold classifier on the final horizontal displacement.
    /// Strict inequality: `dx == threshold` resets.
    pub fn classify_release(&self, dx: f32) -> ReleaseDecision {
        if dx > self.threshold {
            ReleaseDecision::Commit(SwipeDirection::Right)
        } else if dx < -self.threshold {
            ReleaseDecision::Commit(SwipeDirection::Left)
        } else {
            ReleaseDecision::Reset
        }
    }

    pub fn off_screen_target(&self, direction: SwipeDirection) -> Vector2 {
        Vector2::new(direction.sign() * self.off_screen_x, 0.0)
    }

    /// Rotation in degrees for a horizontal offset, interpolated over
    /// `[-domain, 0, domain]` onto `[-max, 0, max]` and clamped at the edges.
    pub fn rotation_for(&self, x: f32) -> f32 {
        (x / self.rotation_domain).clamp(-1.0, 1.0) * self.max_rotation_deg
    }
}
