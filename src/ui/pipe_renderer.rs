//! Pipe drawing strategy, chosen once at startup.
//!
//! `assets/pipe.txt` holds a text sprite: the first row is the pipe body, the
//! optional second row is the rim drawn next to the gap. Lines starting with
//! `#` are comments. Each row is stretched across the pipe's on-screen width.
//! If the sprite can't be loaded the pipes are drawn as solid rectangles.

use crate::constants::PIPE_SPRITE_FILE;
use ratatui::style::{Color, Modifier, Style};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("failed to read pipe sprite {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("pipe sprite has no rows")]
    Empty,
    #[error("pipe sprite rows differ in width (body {body}, rim {rim})")]
    Ragged { body: usize, rim: usize },
}

/// Text sprite for a pipe column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeSprite {
    body: Vec<char>,
    rim: Vec<char>,
}

impl PipeSprite {
    pub fn parse(text: &str) -> Result<Self, SpriteError> {
        let mut rows = text
            .lines()
            .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
            .map(|line| line.chars().collect::<Vec<_>>());

        let body = rows.next().ok_or(SpriteError::Empty)?;
        let rim = rows.next().unwrap_or_else(|| body.clone());
        if rim.len() != body.len() {
            return Err(SpriteError::Ragged {
                body: body.len(),
                rim: rim.len(),
            });
        }
        Ok(Self { body, rim })
    }

    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let text = fs::read_to_string(path).map_err(|source| SpriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Glyph for column `offset` of a pipe `span` cells wide.
    fn glyph(&self, is_rim: bool, offset: usize, span: usize) -> char {
        let row = if is_rim { &self.rim } else { &self.body };
        let idx = offset * row.len() / span.max(1);
        row[idx.min(row.len() - 1)]
    }
}

/// Position of a cell inside a pipe, as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeCell {
    /// Column offset from the pipe's left edge, in cells.
    pub offset: usize,
    /// Pipe width in cells.
    pub span: usize,
    /// Whether this cell borders the gap.
    pub is_rim: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipeRenderer {
    Sprite(PipeSprite),
    Shape,
}

impl PipeRenderer {
    /// Load the sprite from `assets_dir`, falling back to plain rectangles.
    pub fn from_assets(assets_dir: &Path) -> Self {
        let path = assets_dir.join(PIPE_SPRITE_FILE);
        match PipeSprite::load(&path) {
            Ok(sprite) => {
                tracing::info!(path = %path.display(), "Loaded pipe sprite");
                PipeRenderer::Sprite(sprite)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Pipe sprite unavailable, drawing rectangles");
                PipeRenderer::Shape
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PipeRenderer::Sprite(_) => "sprite",
            PipeRenderer::Shape => "shape",
        }
    }

    /// Glyph and style for one pipe cell.
    pub fn cell(&self, cell: PipeCell) -> (char, Style) {
        match self {
            PipeRenderer::Sprite(sprite) => {
                let style = if cell.is_rim {
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green)
                };
                (sprite.glyph(cell.is_rim, cell.offset, cell.span), style)
            }
            PipeRenderer::Shape => ('█', Style::default().fg(Color::Green)),
        }
    }
}
