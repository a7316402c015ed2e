//! Game logic for Skyflap: input dispatch, the per-tick world update,
//! pipe spawning, scoring and collision detection.

use super::types::{Game, Phase, Pipe, TickEvents};
use rand::Rng;

/// Gameplay inputs, already decoded from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Space / Up.
    Flap,
    /// N / Enter on the menu.
    NewGame,
    /// C: resume from the menu, or leave the game-over screen.
    Continue,
    /// Any other key.
    Other,
}

/// Feed one input into the state machine.
pub fn process_input(game: &mut Game, input: GameInput, now_ms: u64) {
    let before = game.phase;

    match (game.phase, input) {
        (Phase::Playing, GameInput::Flap) => game.bird.flap(),
        (Phase::Playing, _) => {}
        (Phase::Menu, GameInput::NewGame) => game.full_reset(now_ms),
        (Phase::Menu, GameInput::Continue) => game.soft_reset(now_ms),
        (Phase::Menu, _) => {}
        // Without a menu, any key restarts from scratch
        (Phase::GameOver, _) if !game.mode.has_menu() => game.full_reset(now_ms),
        (Phase::GameOver, GameInput::Continue) => game.phase = Phase::Menu,
        (Phase::GameOver, _) => {}
    }

    if game.phase != before {
        tracing::info!(
            from = before.name(),
            to = game.phase.name(),
            score = game.score,
            "Phase changed"
        );
    }
}

/// Advance the world by one fixed timestep. Does nothing outside `Playing`.
pub fn process_tick<R: Rng>(game: &mut Game, now_ms: u64, rng: &mut R) -> TickEvents {
    let mut events = TickEvents::default();
    if game.phase != Phase::Playing {
        return events;
    }

    game.bird.update();
    events.spawned = maybe_spawn_pipe(game, now_ms, rng);
    events.points = scroll_pipes(game);
    prune_pipes(game);
    scroll_ground(game);

    if check_collision(game) {
        events.crashed = true;
        events.new_high_score = end_run(game);
    }

    events
}

/// Spawn a pipe if the spawn interval has elapsed.
///
/// The timer restarts on every elapsed interval, including when the live-pipe
/// cap suppresses the spawn, so the cadence stays fixed.
pub fn maybe_spawn_pipe<R: Rng>(game: &mut Game, now_ms: u64, rng: &mut R) -> bool {
    if now_ms.saturating_sub(game.last_spawn_ms) <= game.rules.pipe_spawn_interval_ms {
        return false;
    }
    game.last_spawn_ms = now_ms;

    if let Some(cap) = game.pipe_cap() {
        if game.pipes.len() >= cap {
            tracing::debug!(live = game.pipes.len(), cap, "Pipe cap reached, skipping spawn");
            return false;
        }
    }

    spawn_pipe(game, rng);
    true
}

/// Append a pipe at the right edge with a random gap centre.
pub fn spawn_pipe<R: Rng>(game: &mut Game, rng: &mut R) {
    let (low, high) = game.rules.gap_center_range();
    let gap_center = rng.gen_range(low..=high) as f32;
    let pipe = Pipe::new(game.rules.playfield_width, gap_center, game.rules.pipe_gap);
    tracing::debug!(x = pipe.x, top = pipe.top, bottom = pipe.bottom, "Spawned pipe");
    game.pipes.push(pipe);
}

/// Move every pipe left and award points for pipes the bird has cleared.
fn scroll_pipes(game: &mut Game) -> u32 {
    let speed = game.rules.pipe_speed;
    let width = game.rules.pipe_width;
    let bird_x = game.bird.x;
    let mut points = 0;

    for pipe in &mut game.pipes {
        pipe.x -= speed;
        if !pipe.scored && pipe.x + width < bird_x {
            pipe.scored = true;
            points += 1;
        }
    }

    game.score += points;
    points
}

/// Drop pipes whose trailing edge has left the playfield.
fn prune_pipes(game: &mut Game) {
    let width = game.rules.pipe_width;
    game.pipes.retain(|p| p.x > -width);
}

fn scroll_ground(game: &mut Game) {
    let width = game.rules.playfield_width;
    if width > 0.0 {
        game.ground_offset = (game.ground_offset + game.rules.pipe_speed) % width;
    }
}

/// Whether the bird touches a pipe, the ceiling or the ground strip.
///
/// Evaluated after movement only, so a very fast pipe can skip past a thin
/// overlap between two ticks.
pub fn check_collision(game: &Game) -> bool {
    let bird = game.bird.rect();
    let width = game.rules.pipe_width;
    let height = game.rules.playfield_height;

    let hit_pipe = game.pipes.iter().any(|pipe| {
        bird.overlaps(&pipe.top_rect(width)) || bird.overlaps(&pipe.bottom_rect(width, height))
    });

    hit_pipe || game.bird.y <= 0.0 || game.bird.y + game.bird.size >= game.rules.ground_y()
}

/// Move to `GameOver` and record the high score. Returns the new best, if any.
fn end_run(game: &mut Game) -> Option<u32> {
    game.phase = Phase::GameOver;
    game.runs += 1;
    let new_best = raise_high_score(game);
    game.last_run_new_best = new_best.is_some();
    tracing::info!(
        score = game.score,
        high_score = game.high_score,
        runs = game.runs,
        "Run ended"
    );
    new_best
}

/// Settle the score when the player quits. Returns the new best, if any.
pub fn finish_session(game: &mut Game) -> Option<u32> {
    raise_high_score(game)
}

fn raise_high_score(game: &mut Game) -> Option<u32> {
    if game.score > game.high_score {
        game.high_score = game.score;
        Some(game.score)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, Rules};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn playing(mode: Mode) -> Game {
        let mut game = Game::new(mode, Rules::default(), 0, 0);
        game.phase = Phase::Playing;
        game
    }

    /// Bird that hovers in place so long scenarios don't crash.
    fn hovering(mode: Mode) -> Game {
        let mut game = playing(mode);
        game.bird.gravity = 0.0;
        game
    }

    #[test]
    fn test_one_tick_from_rest() {
        let mut game = playing(Mode::Arcade);
        let mut rng = test_rng();
        let events = process_tick(&mut game, 0, &mut rng);
        assert_eq!(game.bird.velocity, 0.5);
        assert_eq!(game.bird.y, 300.5);
        assert!(!events.crashed);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_flap_only_while_playing() {
        let mut game = Game::new(Mode::Arcade, Rules::default(), 0, 0);
        process_input(&mut game, GameInput::Flap, 0);
        assert_eq!(game.bird.velocity, 0.0);
        assert_eq!(game.phase, Phase::Menu);

        game.phase = Phase::Playing;
        game.bird.velocity = 7.5;
        process_input(&mut game, GameInput::Flap, 0);
        assert_eq!(game.bird.velocity, -10.0);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_no_world_update_outside_playing() {
        let mut rng = test_rng();
        for phase in [Phase::Menu, Phase::GameOver] {
            let mut game = Game::new(Mode::Arcade, Rules::default(), 0, 0);
            game.phase = phase;
            game.pipes.push(Pipe::new(300.0, 300.0, 150.0));
            let events = process_tick(&mut game, 10_000, &mut rng);
            assert_eq!(events, TickEvents::default());
            assert_eq!(game.bird.y, 300.0);
            assert_eq!(game.pipes.len(), 1);
            assert_eq!(game.pipes[0].x, 300.0);
        }
    }

    #[test]
    fn test_pipe_scrolls_and_is_pruned_at_trailing_edge() {
        let mut game = hovering(Mode::Arcade);
        game.pipes.push(Pipe::new(400.0, 300.0, 150.0));
        let mut rng = test_rng();

        process_tick(&mut game, 0, &mut rng);
        assert_eq!(game.pipes[0].x, 397.0);

        for _ in 1..149 {
            process_tick(&mut game, 0, &mut rng);
        }
        assert_eq!(game.pipes.len(), 1);
        assert_eq!(game.pipes[0].x, -47.0);

        process_tick(&mut game, 0, &mut rng);
        assert!(game.pipes.is_empty());
        assert_eq!(game.phase, Phase::Playing);

        process_tick(&mut game, 0, &mut rng);
        assert!(game.pipes.is_empty());
    }

    #[test]
    fn test_pipe_scored_exactly_once() {
        let mut game = hovering(Mode::Arcade);
        game.pipes.push(Pipe::new(60.0, 300.0, 150.0));
        let mut rng = test_rng();

        // 57, 54, 51: trailing edge not yet past the bird
        for _ in 0..3 {
            process_tick(&mut game, 0, &mut rng);
        }
        assert_eq!(game.score, 0);
        assert!(!game.pipes[0].scored);

        // 48 + 50 < 100
        let events = process_tick(&mut game, 0, &mut rng);
        assert_eq!(events.points, 1);
        assert_eq!(game.score, 1);
        assert!(game.pipes[0].scored);

        for _ in 0..10 {
            let events = process_tick(&mut game, 0, &mut rng);
            assert_eq!(events.points, 0);
        }
        assert_eq!(game.score, 1);
    }

    #[test]
    fn test_spawn_interval_is_strict() {
        let mut game = hovering(Mode::Arcade);
        let mut rng = test_rng();

        let events = process_tick(&mut game, 1500, &mut rng);
        assert!(!events.spawned);
        assert!(game.pipes.is_empty());

        let events = process_tick(&mut game, 1501, &mut rng);
        assert!(events.spawned);
        assert_eq!(game.pipes.len(), 1);
        // Spawned at the right edge, then scrolled in the same tick
        assert_eq!(game.pipes[0].x, 397.0);
        assert_eq!(game.last_spawn_ms, 1501);

        let events = process_tick(&mut game, 2000, &mut rng);
        assert!(!events.spawned);
    }

    #[test]
    fn test_spawned_gap_within_safe_band() {
        let mut game = hovering(Mode::Classic);
        let mut rng = test_rng();
        for _ in 0..200 {
            spawn_pipe(&mut game, &mut rng);
        }
        for pipe in &game.pipes {
            assert_eq!(pipe.bottom - pipe.top, 150.0);
            let center = (pipe.top + pipe.bottom) / 2.0;
            assert!((150.0..=350.0).contains(&center));
            assert!(!pipe.scored);
            assert_eq!(pipe.x, 400.0);
        }
    }

    #[test]
    fn test_arcade_respects_pipe_cap() {
        let mut game = hovering(Mode::Arcade);
        let cap = game.pipe_cap().unwrap();
        let mut rng = test_rng();
        let mut now = 0;
        for _ in 0..60 {
            now += 1501;
            process_tick(&mut game, now, &mut rng);
            assert!(game.pipes.len() <= cap);
        }
        assert_eq!(game.pipes.len(), cap);
        assert_eq!(game.phase, Phase::Playing);
    }

    #[test]
    fn test_classic_is_uncapped() {
        let mut game = hovering(Mode::Classic);
        let mut rng = test_rng();
        let mut now = 0;
        for _ in 0..60 {
            now += 1501;
            process_tick(&mut game, now, &mut rng);
        }
        assert_eq!(game.pipes.len(), 60);
    }

    #[test]
    fn test_ceiling_and_ground_collisions() {
        let mut game = playing(Mode::Arcade);
        game.bird.y = 0.0;
        assert!(check_collision(&game));
        game.bird.y = 0.5;
        assert!(!check_collision(&game));
        game.bird.y = 480.0;
        assert!(check_collision(&game));
        game.bird.y = 479.5;
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_pipe_collisions() {
        let mut game = playing(Mode::Arcade);
        // Gap from 200 to 350, pipe spans the bird's column
        game.pipes.push(Pipe {
            x: 90.0,
            top: 200.0,
            bottom: 350.0,
            scored: false,
        });

        game.bird.y = 250.0;
        assert!(!check_collision(&game));

        game.bird.y = 185.0;
        assert!(check_collision(&game));

        game.bird.y = 335.0;
        assert!(check_collision(&game));

        // Touching the upper pipe's edge is not a hit
        game.bird.y = 200.0;
        assert!(!check_collision(&game));
    }

    #[test]
    fn test_pipe_edge_touch_is_not_collision() {
        let mut game = playing(Mode::Arcade);
        game.bird.y = 100.0;
        game.pipes.push(Pipe {
            x: 120.0,
            top: 300.0,
            bottom: 450.0,
            scored: false,
        });
        assert!(!check_collision(&game));
        game.pipes[0].x = 119.0;
        assert!(check_collision(&game));
    }

    #[test]
    fn test_crash_records_new_high_score() {
        let mut game = playing(Mode::Arcade);
        game.high_score = 2;
        game.score = 3;
        game.bird.y = 480.0;
        let mut rng = test_rng();

        let events = process_tick(&mut game, 0, &mut rng);
        assert!(events.crashed);
        assert_eq!(events.new_high_score, Some(3));
        assert_eq!(game.high_score, 3);
        assert!(game.last_run_new_best);
        assert_eq!(game.phase, Phase::GameOver);
        assert_eq!(game.runs, 1);
    }

    #[test]
    fn test_crash_below_high_score_keeps_it() {
        let mut game = playing(Mode::Arcade);
        game.high_score = 10;
        game.score = 10;
        game.bird.y = 480.0;
        let mut rng = test_rng();

        let events = process_tick(&mut game, 0, &mut rng);
        assert!(events.crashed);
        assert_eq!(events.new_high_score, None);
        assert_eq!(game.high_score, 10);
        assert!(!game.last_run_new_best);
    }

    #[test]
    fn test_repeat_crash_with_carried_score_is_not_new_best() {
        let mut game = playing(Mode::Arcade);
        game.score = 5;
        game.bird.y = 480.0;
        let mut rng = test_rng();
        process_tick(&mut game, 0, &mut rng);
        assert!(game.last_run_new_best);

        process_input(&mut game, GameInput::Continue, 10);
        process_input(&mut game, GameInput::Continue, 20);
        assert_eq!(game.phase, Phase::Playing);
        assert!(!game.last_run_new_best);

        // Same carried score crashes again: ties the best, doesn't beat it
        game.bird.y = 480.0;
        let events = process_tick(&mut game, 30, &mut rng);
        assert!(events.crashed);
        assert_eq!(events.new_high_score, None);
        assert_eq!(game.score, game.high_score);
        assert!(!game.last_run_new_best);
    }

    #[test]
    fn test_arcade_state_machine() {
        let mut game = Game::new(Mode::Arcade, Rules::default(), 0, 0);
        assert_eq!(game.phase, Phase::Menu);

        process_input(&mut game, GameInput::Other, 10);
        assert_eq!(game.phase, Phase::Menu);

        process_input(&mut game, GameInput::NewGame, 10);
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(game.last_spawn_ms, 10);

        // Crash with some points
        game.score = 4;
        game.bird.y = 480.0;
        process_tick(&mut game, 20, &mut test_rng());
        assert_eq!(game.phase, Phase::GameOver);

        // Only Continue leaves the game-over screen
        for input in [GameInput::Flap, GameInput::NewGame, GameInput::Other] {
            process_input(&mut game, input, 30);
            assert_eq!(game.phase, Phase::GameOver);
        }
        process_input(&mut game, GameInput::Continue, 30);
        assert_eq!(game.phase, Phase::Menu);

        // Continue keeps the score
        process_input(&mut game, GameInput::Continue, 40);
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(game.score, 4);
        assert_eq!(game.bird.y, 300.0);

        // New game resets it
        game.phase = Phase::Menu;
        process_input(&mut game, GameInput::NewGame, 50);
        assert_eq!(game.phase, Phase::Playing);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_classic_any_key_restarts() {
        for input in [
            GameInput::Flap,
            GameInput::NewGame,
            GameInput::Continue,
            GameInput::Other,
        ] {
            let mut game = playing(Mode::Classic);
            game.score = 5;
            game.bird.y = 480.0;
            process_tick(&mut game, 0, &mut test_rng());
            assert_eq!(game.phase, Phase::GameOver);

            process_input(&mut game, input, 100);
            assert_eq!(game.phase, Phase::Playing);
            assert_eq!(game.score, 0);
            assert_eq!(game.bird.velocity, 0.0);
            assert_eq!(game.last_spawn_ms, 100);
        }
    }

    #[test]
    fn test_ground_offset_wraps() {
        let mut game = hovering(Mode::Arcade);
        let mut rng = test_rng();
        for _ in 0..134 {
            process_tick(&mut game, 0, &mut rng);
        }
        // 134 * 3 = 402, wrapped at 400
        assert!((game.ground_offset - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_finish_session() {
        let mut game = playing(Mode::Arcade);
        game.high_score = 3;
        game.score = 2;
        assert_eq!(finish_session(&mut game), None);
        game.score = 8;
        assert_eq!(finish_session(&mut game), Some(8));
        assert_eq!(game.high_score, 8);
    }
}
