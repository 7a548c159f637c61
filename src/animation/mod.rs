//! Animation engine that drives the top card's position.
//!
//! A single [`AnimatedPosition`] holds the current value and at most one
//! running animation. Starting a new animation replaces the running one
//! (last writer wins). Time only moves through [`AnimatedPosition::tick`].

mod spring;
mod timing;

pub use spring::{SpringConfig, SpringState};
pub use timing::TimingFunction;

use crate::domain::Vector2;
use std::time::Duration;

/// Spring animations snap to their target once both displacement and
/// velocity (in normalised units) fall below this
const SPRING_SETTLE_THRESHOLD: f32 = 0.001;

/// How a position moves toward its target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Fixed-duration easing; signals completion exactly once
    Timing {
        duration_ms: f32,
        easing: TimingFunction,
    },
    /// Spring physics; settles asymptotically, no completion signal
    Spring(SpringConfig),
}

impl Transition {
    pub fn timing(duration_ms: f32, easing: TimingFunction) -> Self {
        Transition::Timing {
            duration_ms,
            easing,
        }
    }

    pub fn spring(config: SpringConfig) -> Self {
        Transition::Spring(config)
    }
}

/// Notification produced by [`AnimatedPosition::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// A fixed-duration animation reached its target
    Finished,
}

#[derive(Debug, Clone)]
struct ActiveAnimation {
    from: Vector2,
    to: Vector2,
    transition: Transition,
    elapsed_ms: f32,
    spring: SpringState,
}

#[derive(Debug, Clone, Default)]
pub struct AnimatedPosition {
    value: Vector2,
    active: Option<ActiveAnimation>,
}

impl AnimatedPosition {
    pub fn new(value: Vector2) -> Self {
        Self {
            value,
            active: None,
        }
    }

    pub fn value(&self) -> Vector2 {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Target of the running animation, if any
    pub fn target(&self) -> Option<Vector2> {
        self.active.as_ref().map(|a| a.to)
    }

    /// Jump to `value`, stopping any running animation without completing it
    pub fn set(&mut self, value: Vector2) {
        self.value = value;
        self.active = None;
    }

    /// Start animating toward `target`, superseding any running animation
    pub fn animate_to(&mut self, target: Vector2, transition: Transition) {
        if matches!(transition, Transition::Spring(_)) && self.value == target {
            self.active = None;
            return;
        }

        self.active = Some(ActiveAnimation {
            from: self.value,
            to: target,
            transition,
            elapsed_ms: 0.0,
            spring: SpringState::new(),
        });
    }

    /// Advance the running animation by `dt`
    pub fn tick(&mut self, dt: Duration) -> Option<AnimationEvent> {
        let active = self.active.as_mut()?;
        active.elapsed_ms += dt.as_secs_f32() * 1000.0;

        let transition = active.transition;
        match transition {
            Transition::Timing {
                duration_ms,
                easing,
            } => {
                let t = if duration_ms <= 0.0 {
                    1.0
                } else {
                    (active.elapsed_ms / duration_ms).min(1.0)
                };

                if t >= 1.0 {
                    self.value = active.to;
                    self.active = None;
                    return Some(AnimationEvent::Finished);
                }

                self.value = Vector2::lerp(active.from, active.to, easing.evaluate(t));
                None
            }
            Transition::Spring(config) => {
                let progress = active.spring.step(active.elapsed_ms / 1000.0, &config);
                if active.spring.is_settled(SPRING_SETTLE_THRESHOLD) {
                    self.value = active.to;
                    self.active = None;
                } else {
                    self.value = Vector2::lerp(active.from, active.to, progress);
                }
                None
            }
        }
    }
}
