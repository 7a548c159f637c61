// CLI module for argument parsing and configuration

use crate::config::DeckConfig;
use crate::error::{DeckError, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

/// Swipedeck - a stacked, swipeable card deck in your terminal
///
/// Drag the top card with the mouse, or use the arrow keys: right to like,
/// left to pass.
#[derive(Parser, Debug, Clone)]
#[command(name = "swipedeck")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File with one card per line
    ///
    /// Blank lines are skipped. " | " splits a card into several lines.
    /// Without a file a small demo deck is dealt.
    pub cards: Option<PathBuf>,

    /// Fraction of the deck width a drag must pass to commit a swipe
    #[arg(short = 't', long = "threshold")]
    pub threshold: Option<f32>,

    /// Duration of the swipe-out animation in milliseconds
    #[arg(short = 'd', long = "duration")]
    pub duration_ms: Option<f32>,

    /// Read deck settings from this file instead of the default location
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Write logs to this file (level from RUST_LOG, default debug)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Write the effective deck settings to the config file and exit
    #[arg(long = "save-config")]
    pub save_config: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(ref cards) = self.cards {
            if !cards.is_file() {
                return Err(format!("Cards file does not exist: {}", cards.display()));
            }
        }

        if let Some(threshold) = self.threshold {
            if !(threshold > 0.0 && threshold <= 1.0) {
                return Err(format!(
                    "Invalid threshold: {}. Use a fraction in (0, 1], e.g. 0.25",
                    threshold
                ));
            }
        }

        if let Some(duration) = self.duration_ms {
            if !(duration.is_finite() && duration >= 0.0) {
                return Err(format!(
                    "Invalid duration: {}. Use milliseconds >= 0",
                    duration
                ));
            }
        }

        if let Some(ref config) = self.config {
            // --save-config may create the file
            if !self.save_config && !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Apply command line overrides on top of file configuration
    pub fn apply_overrides(&self, mut config: DeckConfig) -> DeckConfig {
        if let Some(threshold) = self.threshold {
            config.swipe_threshold_ratio = threshold;
        }
        if let Some(duration) = self.duration_ms {
            config.swipe_out_duration_ms = duration;
        }
        config
    }
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub cards_file: Option<PathBuf>,
    /// Explicit config file; `None` means the default location
    pub config_file: Option<PathBuf>,
    pub deck: DeckConfig,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(args: &Args) -> Result<Self> {
        let file_config = match args.config {
            Some(ref path) => DeckConfig::load_from(path)?,
            None => DeckConfig::load()?,
        };

        let deck = args.apply_overrides(file_config);
        deck.validate()?;

        Ok(AppConfig {
            cards_file: args.cards.clone(),
            config_file: args.config.clone(),
            deck,
            log_file: args.log_file.clone(),
        })
    }

    /// Persist the deck settings where they were loaded from.
    ///
    /// Returns the path written.
    pub fn save_deck(&self) -> Result<PathBuf> {
        match self.config_file {
            Some(ref path) => {
                self.deck.save_to(path)?;
                Ok(path.clone())
            }
            None => self.deck.save(),
        }
    }
}

/// Logger for the terminal front end.
///
/// Records go to `log_file` filtered by `RUST_LOG` (default
/// `swipedeck=debug`). Without a file every record is dropped, since the
/// alternate screen owns the terminal.
pub fn logger_builder(log_file: Option<&Path>) -> Result<env_logger::Builder> {
    let Some(path) = log_file else {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Off);
        return Ok(builder);
    };

    let file = fs::File::create(path)?;
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("swipedeck=debug"),
    );
    builder.target(env_logger::Target::Pipe(Box::new(file)));
    Ok(builder)
}

/// Read one card per non-blank line
pub fn read_cards(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    let cards: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if cards.is_empty() {
        return Err(DeckError::ConfigError(format!(
            "No cards found in {}",
            path.display()
        )));
    }

    Ok(cards)
}

/// Deck dealt when no cards file is given
pub fn demo_cards() -> Vec<String> {
    [
        "Ferris | Crab, 9 | Enjoys borrowing, always returns",
        "Tux | Penguin, 32 | Likes kernels and cold weather",
        "Gopher | Rodent, 15 | Will share memory by communicating",
        "Duke | Mascot, 29 | Writes once, runs anywhere",
        "Wilber | Coyote, 28 | Paints in many layers",
        "Octocat | Cat-octopus, 17 | Forks everything",
    ]
    .iter()
    .map(|card| card.to_string())
    .collect()
}
