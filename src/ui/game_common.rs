//! Screen furniture around the playfield: the bordered frame with its side
//! panel, the two-row status bar, and the overlays drawn over the sky.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width of the side panel, borders included.
pub const SIDE_PANEL_WIDTH: u16 = 22;
/// Fewest rows the playfield may shrink to.
pub const PLAYFIELD_MIN_ROWS: u16 = 10;
/// Fewest columns the playfield may shrink to.
pub const PLAYFIELD_MIN_COLS: u16 = 20;
const STATUS_ROWS: u16 = 2;

/// Areas of one Skyflap screen.
///
/// ```text
/// ┌─ Skyflap ──────────────────────┬─ Run ──────────┐
/// │ playfield                      │ side panel     │
/// │                                │                │
/// │ status (2 rows)                │                │
/// └────────────────────────────────┴────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    pub playfield: Rect,
    pub status_bar: Rect,
    pub side_panel: Rect,
}

impl SceneLayout {
    /// Split the area inside the outer border.
    pub fn split(inner: Rect) -> Self {
        let [left, side_panel] = split2(
            inner,
            Direction::Horizontal,
            [
                Constraint::Min(PLAYFIELD_MIN_COLS),
                Constraint::Length(SIDE_PANEL_WIDTH),
            ],
        );
        let [playfield, status_bar] = split2(
            left,
            Direction::Vertical,
            [
                Constraint::Min(PLAYFIELD_MIN_ROWS),
                Constraint::Length(STATUS_ROWS),
            ],
        );
        Self {
            playfield,
            status_bar,
            side_panel,
        }
    }

    /// Clear `area`, draw the titled outer border and split what's inside.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, accent: Color) -> Self {
        frame.render_widget(Clear, area);
        let border = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = border.inner(area);
        frame.render_widget(border, area);
        Self::split(inner)
    }
}

fn split2(area: Rect, direction: Direction, constraints: [Constraint; 2]) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    [chunks[0], chunks[1]]
}

/// Status bar: a centred message row over a row of key hints.
///
/// `keys` pairs a key label with what it does, e.g. `("[Space/Up]", "Flap")`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    color: Color,
    keys: &[(&str, &str)],
) {
    if area.height == 0 {
        return;
    }

    let message = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(message, Rect { height: 1, ..area });

    if area.height >= STATUS_ROWS && !keys.is_empty() {
        let hints = Paragraph::new(key_hints(keys)).alignment(Alignment::Center);
        frame.render_widget(
            hints,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

fn key_hints(keys: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Bordered side panel; returns the area left for its text.
pub fn render_side_panel(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    let panel = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = panel.inner(area);
    frame.render_widget(panel, area);
    inner
}

/// Box of `width` x `height` centred in `area`, shrunk to fit.
fn centred(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Bordered box sized to `lines`, centred over the playfield.
pub fn render_modal(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    lines: Vec<Line<'static>>,
) {
    let text_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let modal = centred(area, text_width + 6, lines.len() as u16 + 2);

    frame.render_widget(Clear, modal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        )
        .title(title.to_string());
    let inner = block.inner(modal);
    frame.render_widget(block, modal);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Full-width crash banner across the middle of the playfield.
///
/// Only the banner rows are cleared; the pipes and the crashed bird stay
/// visible above and below it.
pub fn render_game_over_banner(
    frame: &mut Frame,
    area: Rect,
    headline: &str,
    detail: &str,
    prompt: &str,
) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                headline.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(detail.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(Span::styled(
            prompt.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let banner = centred(area, area.width, lines.len() as u16 + 2);

    frame.render_widget(Clear, banner);
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(banner);
    frame.render_widget(block, banner);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
