//! UI rendering for a Skyflap frame: playfield, info panel, status bar and
//! the phase-dependent menu / game-over overlays.

use crate::config::Mode;
use crate::game::{Game, Phase};
use crate::ui::game_common::{
    render_game_over_banner, render_modal, render_side_panel, render_status_bar, SceneLayout,
};
use crate::ui::pipe_renderer::PipeRenderer;
use crate::ui::playfield::render_playfield;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the whole game scene.
pub fn render_skyflap(frame: &mut Frame, area: Rect, game: &Game, renderer: &PipeRenderer) {
    let layout = SceneLayout::render(frame, area, " Skyflap ", Color::Cyan);

    render_playfield(frame, layout.playfield, game, renderer);
    render_score(frame, layout.playfield, game);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.side_panel, game, renderer);

    match game.phase {
        Phase::Menu => render_menu(frame, layout.playfield, game),
        Phase::GameOver => render_game_over(frame, layout.playfield, game),
        Phase::Playing => {}
    }
}

/// Score in the top-left corner of the playfield.
fn render_score(frame: &mut Frame, area: Rect, game: &Game) {
    if area.height == 0 || area.width < 2 {
        return;
    }
    let text = Paragraph::new(Span::styled(
        format!("Score: {}", game.score),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        text,
        Rect {
            x: area.x + 1,
            height: 1,
            width: area.width - 1,
            ..area
        },
    );
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &Game) {
    match (game.phase, game.mode) {
        (Phase::Menu, _) => render_status_bar(
            frame,
            area,
            "Ready?",
            Color::Yellow,
            &[("[N]", "New game"), ("[C]", "Continue"), ("[Q]", "Quit")],
        ),
        (Phase::Playing, _) => render_status_bar(
            frame,
            area,
            &format!("Score: {}", game.score),
            Color::Green,
            &[("[Space/Up]", "Flap"), ("[Q]", "Quit")],
        ),
        (Phase::GameOver, Mode::Arcade) => render_status_bar(
            frame,
            area,
            "Crashed!",
            Color::Red,
            &[("[C]", "Menu"), ("[Q]", "Quit")],
        ),
        (Phase::GameOver, Mode::Classic) => render_status_bar(
            frame,
            area,
            "Crashed!",
            Color::Red,
            &[("[Space]", "Restart"), ("[Q]", "Quit")],
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &Game, renderer: &PipeRenderer) {
    let inner = render_side_panel(frame, area, " Run ");

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", game.mode.name()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                game.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if game.mode.persists_high_score() {
        lines.push(Line::from(vec![
            Span::styled(" Best: ", label),
            Span::styled(
                game.high_score.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    lines.push(Line::from(""));
    let pipes = match game.pipe_cap() {
        Some(cap) => format!("{}/{}", game.pipes.len(), cap),
        None => game.pipes.len().to_string(),
    };
    lines.push(Line::from(vec![
        Span::styled(" Pipes: ", label),
        Span::styled(pipes, Style::default().fg(Color::Green)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Runs: ", label),
        Span::styled(game.runs.to_string(), Style::default().fg(Color::White)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" Pipes drawn as {}", renderer.name()),
        label,
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_menu(frame: &mut Frame, area: Rect, game: &Game) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Best: {}", game.high_score),
            Style::default().fg(Color::Yellow),
        )),
    ];
    if game.score > 0 {
        lines.push(Line::from(Span::styled(
            format!("Carried score: {}", game.score),
            Style::default().fg(Color::White),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[N] New game   [C] Continue",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "[Q] Quit",
        Style::default().fg(Color::DarkGray),
    )));

    render_modal(frame, area, " Skyflap ", Color::Yellow, lines);
}

fn render_game_over(frame: &mut Frame, area: Rect, game: &Game) {
    match game.mode {
        Mode::Arcade => {
            let message = if game.last_run_new_best {
                format!("New best: {}!", game.score)
            } else {
                format!("Score {}  Best {}", game.score, game.high_score)
            };
            render_game_over_banner(frame, area, "Game Over!", &message, "[C] Continue");
        }
        Mode::Classic => render_game_over_banner(
            frame,
            area,
            "Game Over!",
            &format!("Score {}", game.score),
            "Press SPACE to restart",
        ),
    }
}
