pub mod flappy_scene;
pub mod game_common;
pub mod pipe_renderer;
pub mod playfield;

use crate::game::Game;
use pipe_renderer::PipeRenderer;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Smallest terminal the scene is laid out for.
const MIN_WIDTH: u16 = 48;
const MIN_HEIGHT: u16 = 16;

/// Main UI drawing function, called once per frame.
pub fn draw(frame: &mut Frame, game: &Game, renderer: &PipeRenderer) {
    let size = frame.size();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_too_small(frame, size);
        return;
    }
    flappy_scene::render_skyflap(frame, size, game, renderer);
}

fn render_too_small(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("Need {}x{}", MIN_WIDTH, MIN_HEIGHT)),
        Line::from(format!("Have {}x{}", area.width, area.height)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
