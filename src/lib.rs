//! Swipedeck - a stacked, swipeable card deck
//!
//! The core is [`CardDeck`], a small interaction state machine: a drag moves
//! the top card, releasing it past a threshold animates it off-screen and
//! advances the deck, releasing it short of the threshold springs it back.
//! The crate also provides the animation engine and pan tracker the deck is
//! driven by, and a terminal front end built on ratatui.

pub mod animation;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod tui;

// Re-export primary types for convenience
pub use animation::{AnimatedPosition, SpringConfig, TimingFunction, Transition};
pub use config::DeckConfig;
pub use domain::{
    CardDeck, CardLayer, DeckFrame, GestureEvent, PanTracker, ReleaseDecision, SwipeDirection,
    SwipeMetrics, Vector2,
};
pub use error::{DeckError, Result};
