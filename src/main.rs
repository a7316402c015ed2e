use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use skyflap::clock::GameClock;
use skyflap::game::{finish_session, process_input, process_tick, TickEvents};
use skyflap::input::{map_key, Command};
use skyflap::ui::pipe_renderer::PipeRenderer;
use skyflap::utils::build_info;
use skyflap::utils::persistence::{default_data_dir, ensure_dir};
use skyflap::{Game, GameConfig, HighScoreStore, Mode};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Skyflap - guide the bird through the pipes.
#[derive(Debug, Parser)]
#[command(name = "skyflap", version = build_info::VERSION_STRING)]
struct Cli {
    /// Play the classic rules: no menu, no pipe cap, no saved high score
    #[arg(long)]
    classic: bool,

    /// Directory for config.json, highscore.txt and the log (default ~/.skyflap)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Directory containing pipe.txt
    #[arg(long, value_name = "PATH")]
    assets: Option<PathBuf>,

    /// Seed for the pipe layout
    #[arg(long)]
    seed: Option<u64>,

    /// Frames (and world ticks) per second
    #[arg(long)]
    fps: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => ensure_dir(dir),
        None => default_data_dir(),
    }
    .context("preparing data directory")?;

    skyflap::logging::init(&data_dir)?;

    let mut config = GameConfig::load(&data_dir);
    if cli.classic {
        config.mode = Mode::Classic;
    }
    if let Some(assets) = cli.assets {
        config.assets_dir = Some(assets);
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }

    let store = HighScoreStore::new(&data_dir);
    let renderer = PipeRenderer::from_assets(&config.assets_dir());

    tracing::info!(
        mode = config.mode.name(),
        fps = config.fps,
        seed = ?config.seed,
        renderer = renderer.name(),
        "Starting skyflap"
    );

    let mut terminal = setup_terminal().context("setting up terminal")?;
    let result = run(&mut terminal, &config, &store, &renderer);
    restore_terminal(&mut terminal).context("restoring terminal")?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Game loop failed");
    }
    result
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Fixed-timestep frame loop: input, update, draw, wait.
fn run(
    terminal: &mut Tui,
    config: &GameConfig,
    store: &HighScoreStore,
    renderer: &PipeRenderer,
) -> anyhow::Result<()> {
    let clock = GameClock::new();
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let high_score = if config.mode.persists_high_score() {
        store.load()
    } else {
        0
    };
    let mut game = Game::new(config.mode, config.rules.clone(), high_score, clock.now_ms());

    let frame_duration = config.frame_duration();
    let mut next_frame = Instant::now();

    loop {
        // Drain pending input without blocking
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(Command::Quit) => quit = true,
                    Some(Command::Game(input)) => process_input(&mut game, input, clock.now_ms()),
                    None => {}
                }
            }
        }

        if quit {
            break;
        }

        let events = process_tick(&mut game, clock.now_ms(), &mut rng);
        handle_tick_events(&game, &events, store);
        terminal.draw(|frame| skyflap::ui::draw(frame, &game, renderer))?;

        // Frame pacing; if we fell behind, don't try to catch up
        next_frame += frame_duration;
        let now = Instant::now();
        if next_frame > now {
            std::thread::sleep(next_frame - now);
        } else {
            next_frame = now;
        }
    }

    if let Some(best) = finish_session(&mut game) {
        persist_high_score(&game, store, best);
    }
    tracing::info!(score = game.score, high_score = game.high_score, runs = game.runs, "Quit");

    Ok(())
}

fn handle_tick_events(game: &Game, events: &TickEvents, store: &HighScoreStore) {
    if events.points > 0 {
        tracing::debug!(score = game.score, "Pipe cleared");
    }
    if let Some(best) = events.new_high_score {
        persist_high_score(game, store, best);
    }
}

fn persist_high_score(game: &Game, store: &HighScoreStore, score: u32) {
    if !game.mode.persists_high_score() {
        return;
    }
    if let Err(e) = store.record(score) {
        tracing::warn!(error = %e, path = %store.path().display(), "Failed to save high score");
    }
}
