//! Rasterises the world (sky, pipes, scrolling ground, bird) onto the
//! terminal cell grid.

use crate::game::{Game, Rect as WorldRect};
use crate::ui::pipe_renderer::{PipeCell, PipeRenderer};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of one ground stripe in world units.
const GROUND_STRIPE: f32 = 20.0;

/// Maps terminal cells to world coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    /// World units per cell.
    pub cell_w: f32,
    pub cell_h: f32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_w: f32, world_h: f32) -> Self {
        Self {
            cols,
            rows,
            cell_w: world_w / f32::from(cols.max(1)),
            cell_h: world_h / f32::from(rows.max(1)),
        }
    }

    /// World-space bounds of a cell.
    pub fn cell_bounds(&self, col: u16, row: u16) -> WorldRect {
        WorldRect::new(
            f32::from(col) * self.cell_w,
            f32::from(row) * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    /// First and last column whose centre falls in `[x0, x1)`.
    fn column_span(&self, x0: f32, x1: f32) -> (i32, i32) {
        let first = (x0 / self.cell_w - 0.5).ceil() as i32;
        let last = (x1 / self.cell_w - 0.5).ceil() as i32 - 1;
        (first, last)
    }
}

/// Render the play area into `area`.
pub fn render_playfield(frame: &mut Frame, area: Rect, game: &Game, renderer: &PipeRenderer) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let lines = playfield_lines(game, renderer, area.width, area.height);
    frame.render_widget(Paragraph::new(lines), area);
}

/// Build the play area line by line, one span per cell.
pub fn playfield_lines(
    game: &Game,
    renderer: &PipeRenderer,
    cols: u16,
    rows: u16,
) -> Vec<Line<'static>> {
    let rules = &game.rules;
    let view = Viewport::new(cols, rows, rules.playfield_width, rules.playfield_height);
    let bird = game.bird.rect();
    let ground_y = rules.ground_y();

    let mut lines = Vec::with_capacity(rows as usize);
    for row in 0..rows {
        let mut spans = Vec::with_capacity(cols as usize);
        for col in 0..cols {
            let cell = view.cell_bounds(col, row);
            let (cx, cy) = (cell.x + cell.w / 2.0, cell.y + cell.h / 2.0);

            // Draw order: bird over ground over pipes over sky
            let (glyph, style) = if cell.overlaps(&bird) {
                let leading = !view.cell_bounds(col + 1, row).overlaps(&bird);
                bird_cell(game.bird.velocity, leading)
            } else if cy >= ground_y {
                ground_cell(cx + game.ground_offset, cy - cell.h < ground_y)
            } else if let Some(pipe_cell) = pipe_cell_at(game, &view, col, cx, cy) {
                renderer.cell(pipe_cell)
            } else {
                (' ', Style::default())
            };
            spans.push(Span::styled(glyph.to_string(), style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn bird_cell(velocity: f32, leading: bool) -> (char, Style) {
    let style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    if !leading {
        return ('█', style);
    }
    let glyph = if velocity < -2.0 {
        '▲' // climbing
    } else if velocity > 4.0 {
        '▼' // diving
    } else {
        '►'
    };
    (glyph, style)
}

fn ground_cell(world_x: f32, is_surface: bool) -> (char, Style) {
    if is_surface {
        return ('▀', Style::default().fg(Color::Green));
    }
    let stripe = (world_x / GROUND_STRIPE).floor() as i64;
    let glyph = if stripe.rem_euclid(2) == 0 { '▒' } else { '░' };
    (glyph, Style::default().fg(Color::Yellow))
}

/// Which pipe, if any, covers the cell centred at (`cx`, `cy`).
fn pipe_cell_at(game: &Game, view: &Viewport, col: u16, cx: f32, cy: f32) -> Option<PipeCell> {
    let width = game.rules.pipe_width;
    let height = game.rules.playfield_height;

    game.pipes.iter().find_map(|pipe| {
        let in_top = pipe.top_rect(width).contains(cx, cy);
        let in_bottom = pipe.bottom_rect(width, height).contains(cx, cy);
        if !in_top && !in_bottom {
            return None;
        }
        let (first, last) = view.column_span(pipe.x, pipe.x + width);
        let is_rim = if in_top {
            cy + view.cell_h >= pipe.top
        } else {
            cy - view.cell_h < pipe.bottom
        };
        Some(PipeCell {
            offset: (i32::from(col) - first).max(0) as usize,
            span: (last - first + 1).max(1) as usize,
            is_rim,
        })
    })
}
