//! Skyflap - terminal Flappy Bird
//!
//! The game core lives in [`game`]; the rest is the plumbing the binary
//! wraps around it (input decoding, rendering, persistence, logging).

pub mod clock;
pub mod config;
pub mod constants;
pub mod game;
pub mod high_score;
pub mod input;
pub mod logging;
pub mod ui;
pub mod utils;

pub use config::{GameConfig, Mode, Rules};
pub use game::{Game, GameInput, Phase};
pub use high_score::HighScoreStore;
