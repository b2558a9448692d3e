use super::SimpleWindow;
use crate::surface::Surface;
use crate::theme;
use crate::window::{Bounds, Window};

pub const FIELD_WIDTH: usize = 10;
pub const FIELD_HEIGHT: usize = 20;
/// Each block is drawn as two cells so it looks roughly square.
const BLOCK_CELLS: i32 = 2;
const PREVIEW_WIDTH: i32 = 9;
const PREVIEW_HEIGHT: i32 = 5;

/// A stone as rows of color indices; 0 is empty.
pub type Stone = &'static [&'static [u8]];

pub const STONES: [Stone; 7] = [
    &[&[1, 1], &[1, 1]],
    &[&[2], &[2], &[2], &[2]],
    &[&[3, 3, 0], &[0, 3, 3]],
    &[&[0, 4, 4], &[4, 4, 0]],
    &[&[5, 5], &[5, 0], &[5, 0]],
    &[&[6, 6], &[0, 6], &[0, 6]],
    &[&[0, 7, 0], &[7, 7, 7]],
];

/// Static falling-blocks board: the playing field on the left and a preview
/// box with the next stone on the right.
#[derive(Debug, Clone)]
pub struct BlockGameWindow {
    base: SimpleWindow,
    field: [[u8; FIELD_WIDTH]; FIELD_HEIGHT],
    next: usize,
}

impl BlockGameWindow {
    /// Board with its top-left corner at `(x, y)` and the lower half of the
    /// field pre-filled with a demo pattern.
    pub fn new(x: i32, y: i32) -> Self {
        let width = FIELD_WIDTH as i32 * BLOCK_CELLS + 1 + PREVIEW_WIDTH + 1;
        let height = FIELD_HEIGHT as i32 + 2;
        let mut field = [[0; FIELD_WIDTH]; FIELD_HEIGHT];
        for (j, row) in field.iter_mut().enumerate().skip(FIELD_HEIGHT / 2) {
            for (i, cell) in row.iter_mut().enumerate() {
                *cell = ((i + j * 12) % STONES.len() + 1) as u8;
            }
        }
        Self {
            base: SimpleWindow::new(Bounds::from_origin(x, y, width, height), theme::game()),
            field,
            next: 3,
        }
    }

    pub fn field(&self) -> &[[u8; FIELD_WIDTH]; FIELD_HEIGHT] {
        &self.field
    }

    pub fn next_stone(&self) -> usize {
        self.next
    }

    pub fn set_next_stone(&mut self, index: usize) {
        self.next = index % STONES.len();
    }

    fn field_frame(&self) -> Bounds {
        let b = self.base.bounds;
        Bounds::new(
            b.x0,
            b.y0 + 1,
            b.x0 + FIELD_WIDTH as i32 * BLOCK_CELLS + 1,
            b.y0 + FIELD_HEIGHT as i32 + 2,
        )
    }

    fn preview_frame(&self) -> Bounds {
        let b = self.base.bounds;
        let x0 = b.x0 + FIELD_WIDTH as i32 * BLOCK_CELLS + 2;
        Bounds::new(x0, b.y0 + 1, x0 + PREVIEW_WIDTH, b.y0 + 1 + PREVIEW_HEIGHT)
    }

    /// Paint one block at field coordinates `(px, py)`; the preview box uses
    /// coordinates past the field width.
    fn draw_block(&self, surface: &mut Surface, color: u8, px: i32, py: i32) {
        let b = self.base.bounds;
        let x = b.x0 + 1 + BLOCK_CELLS * px;
        let y = b.y0 + 2 + py;
        let fg = theme::BLOCK_COLORS
            .get(color as usize)
            .copied()
            .unwrap_or(theme::BLOCK_COLORS[0]);
        let style = self.base.style.fg(fg);
        surface.put(x, y, '█', style);
        surface.put(x + 1, y, '▌', style);
    }

    fn draw_stone(&self, surface: &mut Surface, stone: Stone, px: i32, py: i32) {
        for (dy, row) in stone.iter().enumerate() {
            for (dx, &color) in row.iter().enumerate() {
                self.draw_block(surface, color, px + dx as i32, py + dy as i32);
            }
        }
    }
}

impl Window for BlockGameWindow {
    fn draw(&mut self, surface: &mut Surface) {
        self.base.draw(surface);
        let frame = theme::game_frame();
        surface.draw_border(self.field_frame(), frame);
        surface.draw_border(self.preview_frame(), frame);
        for (y, row) in self.field.iter().enumerate() {
            for (x, &color) in row.iter().enumerate() {
                self.draw_block(surface, color, x as i32, y as i32);
            }
        }
        self.draw_stone(surface, STONES[self.next], FIELD_WIDTH as i32 + 1, 1);
    }

    fn bounds(&self) -> Bounds {
        self.base.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.base.bounds = bounds;
    }
}
