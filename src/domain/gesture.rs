//! Pan gesture recognition.
//!
//! Turns absolute pointer samples into displacement relative to the point
//! where the gesture started. One press, any number of drags, one release.

/// Event delivered to [`CardDeck::handle_gesture`](super::CardDeck::handle_gesture)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start,
    Move { dx: f32, dy: f32 },
    Release { dx: f32, dy: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct PanTracker {
    origin: Option<(f32, f32)>,
}

impl PanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Begin a gesture. Ignored while another gesture is active.
    pub fn press(&mut self, x: f32, y: f32) -> Option<GestureEvent> {
        if self.origin.is_some() {
            return None;
        }
        self.origin = Some((x, y));
        Some(GestureEvent::Start)
    }

    pub fn drag(&mut self, x: f32, y: f32) -> Option<GestureEvent> {
        let (ox, oy) = self.origin?;
        Some(GestureEvent::Move {
            dx: x - ox,
            dy: y - oy,
        })
    }

    /// End the gesture with its final displacement
    pub fn release(&mut self, x: f32, y: f32) -> Option<GestureEvent> {
        let (ox, oy) = self.origin.take()?;
        Some(GestureEvent::Release {
            dx: x - ox,
            dy: y - oy,
        })
    }
}
