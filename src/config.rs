//! Game configuration: rule variant, physics constants and frame pacing.
//!
//! Loaded from `<data_dir>/config.json`; every field is optional in the file
//! and falls back to the values in [`crate::constants`].

use crate::constants::*;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which rule variant is being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Direct play / game-over loop. No menu, no pipe cap, no saved high score.
    Classic,
    /// Menu, continue, pipe cap and persisted high score.
    #[default]
    Arcade,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Classic => "Classic",
            Mode::Arcade => "Arcade",
        }
    }

    pub fn has_menu(self) -> bool {
        matches!(self, Mode::Arcade)
    }

    /// Whether high scores are written to the persistence slot.
    pub fn persists_high_score(self) -> bool {
        matches!(self, Mode::Arcade)
    }

    /// Maximum number of live pipes, if this mode caps them.
    pub fn pipe_cap(self, rules: &Rules) -> Option<usize> {
        match self {
            Mode::Classic => None,
            Mode::Arcade => Some(rules.max_pipes),
        }
    }
}

/// Physics and playfield constants, in world units and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub ground_height: f32,
    pub bird_x: f32,
    pub bird_size: f32,
    /// Velocity added every tick (positive = downward).
    pub gravity: f32,
    /// Velocity set by a flap (negative = upward).
    pub flap_velocity: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    /// Horizontal distance a pipe moves per tick.
    pub pipe_speed: f32,
    pub pipe_spawn_interval_ms: u64,
    pub pipe_gap_margin: f32,
    pub max_pipes: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            bird_x: BIRD_X,
            bird_size: BIRD_SIZE,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            pipe_spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,
            pipe_gap_margin: PIPE_GAP_MARGIN,
            max_pipes: MAX_LIVE_PIPES,
        }
    }
}

impl Rules {
    /// Y coordinate of the top of the ground strip.
    pub fn ground_y(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Inclusive range the gap centre is drawn from.
    ///
    /// Collapses to a single value when the margins leave no room.
    pub fn gap_center_range(&self) -> (i32, i32) {
        let low = self.pipe_gap_margin as i32;
        let high = (self.ground_y() - self.pipe_gap_margin) as i32;
        (low, high.max(low))
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: Mode,
    pub rules: Rules,
    pub fps: u32,
    /// Directory holding `pipe.txt`. Defaults to `./assets`.
    pub assets_dir: Option<PathBuf>,
    /// Fixed RNG seed for reproducible pipe layouts.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            rules: Rules::default(),
            fps: FRAMES_PER_SECOND,
            assets_dir: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load `config.json` from the data directory, falling back to defaults.
    pub fn load(data_dir: &Path) -> Self {
        load_json_or_default(&data_dir.join(CONFIG_FILE))
    }

    /// Length of one fixed timestep. A zero fps is treated as 1.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.assets_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets"))
    }
}
