//! Error types for deck construction, configuration and the terminal front end

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be located, read or written
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Viewport width must be finite and positive
    #[error("Invalid viewport width: {0}")]
    InvalidViewport(f32),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DeckError>;
