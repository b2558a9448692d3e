//! Surface: the single cell buffer every window paints into.
//!
//! Windows live in signed coordinates (a window dragged past the left edge
//! has a negative `x0`), while `ratatui::buffer::Buffer` is indexed by `u16`.
//! `Surface` owns the buffer and clips every write to the visible area so
//! window code never has to guard its own drawing.
//!
//! Presenting the surface to a real terminal is the output driver's job; see
//! `drivers::console::ConsoleOutputDriver::present`.
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use unicode_width::UnicodeWidthChar;

use crate::window::Bounds;

/// Glyphs used for window frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub top_tee: char,
    pub bottom_tee: char,
}

impl BorderGlyphs {
    pub const LINE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        top_tee: '┬',
        bottom_tee: '┴',
    };

    /// Fallback for terminals without line-drawing characters.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
        top_tee: '+',
        bottom_tee: '+',
    };
}

impl Default for BorderGlyphs {
    fn default() -> Self {
        Self::LINE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    buffer: Buffer,
    borders: BorderGlyphs,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            borders: BorderGlyphs::default(),
        }
    }

    pub fn with_borders(mut self, borders: BorderGlyphs) -> Self {
        self.borders = borders;
        self
    }

    pub fn borders(&self) -> BorderGlyphs {
        self.borders
    }

    /// Terminal size in cells as `(width, height)`.
    pub fn size(&self) -> (i32, i32) {
        (self.buffer.area.width as i32, self.buffer.area.height as i32)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(Rect::new(0, 0, width, height));
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn index(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let area = self.buffer.area;
        let inside = x >= area.x as i32
            && x < area.right() as i32
            && y >= area.y as i32
            && y < area.bottom() as i32;
        inside.then_some((x as u16, y as u16))
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).and_then(|pos| self.buffer.cell(pos))
    }

    /// Text currently shown at a cell, or `None` when off-screen.
    pub fn symbol(&self, x: i32, y: i32) -> Option<&str> {
        self.cell(x, y).map(Cell::symbol)
    }

    /// Reset every cell to a blank glyph in `style`.
    pub fn clear(&mut self, style: Style) {
        for cell in self.buffer.content.iter_mut() {
            cell.reset();
            cell.set_style(style);
        }
    }

    pub fn put(&mut self, x: i32, y: i32, glyph: char, style: Style) {
        self.put_combining(x, y, glyph, &[], style);
    }

    /// Write `glyph` followed by zero-width `combining` marks into one cell.
    pub fn put_combining(&mut self, x: i32, y: i32, glyph: char, combining: &[char], style: Style) {
        let Some(pos) = self.index(x, y) else {
            return;
        };
        if let Some(cell) = self.buffer.cell_mut(pos) {
            let mut symbol = String::with_capacity(4 * (1 + combining.len()));
            symbol.push(glyph);
            symbol.extend(combining);
            cell.reset();
            cell.set_symbol(&symbol);
            cell.set_style(style);
        }
    }

    /// Replace the background of a cell, keeping its glyph and foreground.
    pub fn set_background(&mut self, x: i32, y: i32, color: Color) {
        if let Some(pos) = self.index(x, y)
            && let Some(cell) = self.buffer.cell_mut(pos)
        {
            cell.set_bg(color);
        }
    }

    /// Print `text` starting at `(x, y)` and return the column after the last
    /// glyph written.
    pub fn print(&mut self, x: i32, y: i32, text: &str, style: Style) -> i32 {
        self.print_max(x, y, None, text, style)
    }

    /// Print `text` but stop before any glyph that would end past `max_x`.
    pub fn print_max(
        &mut self,
        mut x: i32,
        y: i32,
        max_x: Option<i32>,
        text: &str,
        style: Style,
    ) -> i32 {
        for c in text.chars() {
            let (glyph, combining, width) = match c.width() {
                Some(0) => (' ', Some(c), 1),
                Some(w) => (c, None, w as i32),
                None => (' ', None, 1),
            };
            if let Some(max_x) = max_x
                && x + width > max_x
            {
                break;
            }
            match combining {
                Some(mark) => self.put_combining(x, y, glyph, &[mark], style),
                None => self.put(x, y, glyph, style),
            }
            // trailing half of a wide glyph
            for dx in 1..width {
                if let Some(pos) = self.index(x + dx, y)
                    && let Some(cell) = self.buffer.cell_mut(pos)
                {
                    cell.reset();
                    cell.set_style(style);
                }
            }
            x += width;
        }
        x
    }

    /// Fill every cell of `bounds` (inclusive) with `glyph`.
    pub fn fill(&mut self, bounds: Bounds, glyph: char, style: Style) {
        for y in bounds.y0..=bounds.y1 {
            for x in bounds.x0..=bounds.x1 {
                self.put(x, y, glyph, style);
            }
        }
    }

    /// Draw a single-line frame on the outermost cells of `bounds`.
    pub fn draw_border(&mut self, bounds: Bounds, style: Style) {
        let g = self.borders;
        let Bounds { x0, y0, x1, y1 } = bounds;
        self.put(x0, y0, g.top_left, style);
        self.put(x0, y1, g.bottom_left, style);
        self.put(x1, y1, g.bottom_right, style);
        self.put(x1, y0, g.top_right, style);
        for x in x0 + 1..x1 {
            self.put(x, y0, g.horizontal, style);
            self.put(x, y1, g.horizontal, style);
        }
        for y in y0 + 1..y1 {
            self.put(x0, y, g.vertical, style);
            self.put(x1, y, g.vertical, style);
        }
    }
}
