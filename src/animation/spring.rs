use serde::{Deserialize, Serialize};

/// Configuration for spring physics animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub mass: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringConfig {
    /// Critically-leaning spring used to return a card to center
    pub const DEFAULT: Self = Self {
        mass: 1.0,
        stiffness: 230.0,
        damping: 22.0,
    };

    /// Bouncy spring with visible overshoot, used when the stack settles
    pub const BOUNCY: Self = Self {
        mass: 1.0,
        stiffness: 200.0,
        damping: 10.0,
    };

    /// Snappy spring with quick response
    pub const SNAPPY: Self = Self {
        mass: 1.0,
        stiffness: 250.0,
        damping: 14.0,
    };

    pub fn validate(&self) -> Result<(), String> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(format!("spring mass must be positive, got {}", self.mass));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(format!(
                "spring stiffness must be positive, got {}",
                self.stiffness
            ));
        }
        if !(self.damping.is_finite() && self.damping > 0.0) {
            return Err(format!(
                "spring damping must be positive, got {}",
                self.damping
            ));
        }
        Ok(())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// State for spring physics simulation
#[derive(Clone, Debug)]
pub struct SpringState {
    /// Current position (0.0 = start, 1.0 = target)
    pub position: f32,
    pub velocity: f32,
    /// Last evaluation time in seconds
    pub last_t: f32,
}

impl SpringState {
    pub fn new() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            last_t: 0.0,
        }
    }

    /// Step the simulation to `elapsed_secs` since the spring started.
    ///
    /// Returns the current position, which can overshoot 1.0.
    pub fn step(&mut self, elapsed_secs: f32, config: &SpringConfig) -> f32 {
        let dt = (elapsed_secs - self.last_t).max(0.0);
        self.last_t = elapsed_secs;

        if dt < 1e-6 {
            return self.position;
        }

        // Cap individual timestep for numerical stability (~30fps minimum)
        let max_dt = 0.033;
        let mut remaining = dt;
        while remaining > 1e-6 {
            let step = remaining.min(max_dt);
            remaining -= step;

            let displacement = self.position - 1.0;
            let force = -config.stiffness * displacement - config.damping * self.velocity;
            let acceleration = force / config.mass;

            // Semi-implicit Euler
            self.velocity += acceleration * step;
            self.position += self.velocity * step;
        }

        self.position
    }

    pub fn is_settled(&self, threshold: f32) -> bool {
        (self.position - 1.0).abs() < threshold && self.velocity.abs() < threshold
    }
}

impl Default for SpringState {
    fn default() -> Self {
        Self::new()
    }
}
