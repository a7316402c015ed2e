//! Skyflap data structures: bird, pipes, phase and the owning `Game` record.

use crate::config::{Mode, Rules};

/// Axis-aligned rectangle in world units. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test. Touching edges do not count, and a rectangle
    /// with no area never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// The player. Only `y` and `velocity` change during play.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity in units/tick (positive = downward).
    pub velocity: f32,
    pub size: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
}

impl Bird {
    /// Bird at rest, vertically centred in the playfield.
    pub fn new(rules: &Rules) -> Self {
        Self {
            x: rules.bird_x,
            y: (rules.playfield_height / 2.0).floor(),
            velocity: 0.0,
            size: rules.bird_size,
            gravity: rules.gravity,
            flap_velocity: rules.flap_velocity,
        }
    }

    /// Integrate one tick: velocity first, then position. No clamping.
    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;
    }

    /// Overwrite the velocity with the flap impulse.
    pub fn flap(&mut self) {
        self.velocity = self.flap_velocity;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// A top + bottom pipe pair with a gap between `top` and `bottom`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge.
    pub x: f32,
    /// Lower edge of the upper pipe.
    pub top: f32,
    /// Upper edge of the lower pipe.
    pub bottom: f32,
    /// Whether the bird has already been awarded this pipe.
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, gap_center: f32, gap: f32) -> Self {
        let half_gap = (gap / 2.0).floor();
        Self {
            x,
            top: gap_center - half_gap,
            bottom: gap_center + half_gap,
            scored: false,
        }
    }

    pub fn top_rect(&self, width: f32) -> Rect {
        Rect::new(self.x, 0.0, width, self.top)
    }

    /// The lower pipe reaches down to the bottom of the playfield.
    pub fn bottom_rect(&self, width: f32, playfield_height: f32) -> Rect {
        Rect::new(self.x, self.bottom, width, playfield_height - self.bottom)
    }
}

/// State machine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Menu => "menu",
            Phase::Playing => "playing",
            Phase::GameOver => "game_over",
        }
    }
}

/// What happened during one world update, for logging and persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Pipes cleared this tick.
    pub points: u32,
    /// Whether a pipe was spawned.
    pub spawned: bool,
    /// The bird collided and the run ended.
    pub crashed: bool,
    /// Set when the crash produced a new best score.
    pub new_high_score: Option<u32>,
}

/// Complete game state, owned by the frame loop.
#[derive(Debug, Clone)]
pub struct Game {
    pub mode: Mode,
    pub rules: Rules,
    pub phase: Phase,
    pub bird: Bird,
    /// Live pipes in spawn order.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    pub high_score: u32,
    /// Clock timestamp of the last spawn (or of the last reset).
    pub last_spawn_ms: u64,
    /// Ground scroll offset in world units, in `[0, playfield_width)`.
    pub ground_offset: f32,
    /// Completed runs this session.
    pub runs: u32,
    /// Whether the most recent crash raised the high score.
    pub last_run_new_best: bool,
}

impl Game {
    /// Create a new game. Arcade starts on the menu, Classic starts playing.
    pub fn new(mode: Mode, rules: Rules, high_score: u32, now_ms: u64) -> Self {
        let phase = if mode.has_menu() {
            Phase::Menu
        } else {
            Phase::Playing
        };
        Self {
            mode,
            bird: Bird::new(&rules),
            rules,
            phase,
            pipes: Vec::new(),
            score: 0,
            high_score,
            last_spawn_ms: now_ms,
            ground_offset: 0.0,
            runs: 0,
            last_run_new_best: false,
        }
    }

    /// Start over: bird re-centred, pipes cleared, score zeroed.
    pub fn full_reset(&mut self, now_ms: u64) {
        self.soft_reset(now_ms);
        self.score = 0;
    }

    /// Like a full reset but the score carries over.
    pub fn soft_reset(&mut self, now_ms: u64) {
        self.bird = Bird::new(&self.rules);
        self.pipes.clear();
        self.last_spawn_ms = now_ms;
        self.ground_offset = 0.0;
        self.last_run_new_best = false;
        self.phase = Phase::Playing;
    }

    pub fn pipe_cap(&self) -> Option<usize> {
        self.mode.pipe_cap(&self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let game = Game::new(Mode::Arcade, Rules::default(), 7, 1000);
        assert_eq!(game.phase, Phase::Menu);
        assert_eq!(game.score, 0);
        assert_eq!(game.high_score, 7);
        assert_eq!(game.last_spawn_ms, 1000);
        assert!(game.pipes.is_empty());
        assert_eq!(game.bird.x, 100.0);
        assert_eq!(game.bird.y, 300.0);
        assert_eq!(game.bird.velocity, 0.0);
    }

    #[test]
    fn test_classic_starts_playing() {
        let game = Game::new(Mode::Classic, Rules::default(), 0, 0);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_bird_update_integrates_velocity_first() {
        let mut bird = Bird::new(&Rules::default());
        bird.update();
        assert_eq!(bird.velocity, 0.5);
        assert_eq!(bird.y, 300.5);
        bird.update();
        assert_eq!(bird.velocity, 1.0);
        assert_eq!(bird.y, 301.5);
    }

    #[test]
    fn test_flap_overwrites_velocity() {
        let mut bird = Bird::new(&Rules::default());
        bird.velocity = 25.0;
        bird.flap();
        assert_eq!(bird.velocity, -10.0);
        bird.velocity = -3.0;
        bird.flap();
        assert_eq!(bird.velocity, -10.0);
    }

    #[test]
    fn test_pipe_gap_split_evenly() {
        let pipe = Pipe::new(400.0, 250.0, 150.0);
        assert_eq!(pipe.top, 175.0);
        assert_eq!(pipe.bottom, 325.0);
        assert!(!pipe.scored);
        assert_eq!(pipe.top_rect(50.0), Rect::new(400.0, 0.0, 50.0, 175.0));
        assert_eq!(
            pipe.bottom_rect(50.0, 600.0),
            Rect::new(400.0, 325.0, 50.0, 275.0)
        );
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Zero area
        assert!(!a.overlaps(&Rect::new(5.0, 5.0, 0.0, 10.0)));
    }

    #[test]
    fn test_soft_reset_keeps_score() {
        let mut game = Game::new(Mode::Arcade, Rules::default(), 0, 0);
        game.score = 4;
        game.pipes.push(Pipe::new(200.0, 250.0, 150.0));
        game.bird.y = 10.0;
        game.soft_reset(500);
        assert_eq!(game.score, 4);
        assert!(game.pipes.is_empty());
        assert_eq!(game.bird.y, 300.0);
        assert_eq!(game.last_spawn_ms, 500);
        assert_eq!(game.phase, Phase::Playing);

        game.full_reset(900);
        assert_eq!(game.score, 0);
        assert_eq!(game.last_spawn_ms, 900);
    }
}
