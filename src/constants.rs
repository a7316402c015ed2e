// Playfield dimensions (world units)
pub const PLAYFIELD_WIDTH: f32 = 400.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;
pub const GROUND_HEIGHT: f32 = 100.0;

// Bird constants
pub const BIRD_X: f32 = 100.0;
pub const BIRD_SIZE: f32 = 20.0;
pub const GRAVITY: f32 = 0.5;
pub const FLAP_VELOCITY: f32 = -10.0;

// Pipe constants
pub const PIPE_WIDTH: f32 = 50.0;
pub const PIPE_GAP: f32 = 150.0;
pub const PIPE_SPEED: f32 = 3.0;
pub const PIPE_SPAWN_INTERVAL_MS: u64 = 1500;
/// Distance kept between a gap centre and the ceiling / ground strip.
pub const PIPE_GAP_MARGIN: f32 = 150.0;
pub const MAX_LIVE_PIPES: usize = 5;

// Frame pacing
pub const FRAMES_PER_SECOND: u32 = 60;

// Persistence
pub const DATA_DIR_NAME: &str = ".skyflap";
pub const CONFIG_FILE: &str = "config.json";
pub const HIGH_SCORE_FILE: &str = "highscore.txt";
pub const LOG_FILE: &str = "skyflap.log";
pub const PIPE_SPRITE_FILE: &str = "pipe.txt";
pub const LOG_ENV_VAR: &str = "SKYFLAP_LOG";
