use ratatui::style::Style;

use crate::surface::Surface;
use crate::window::{Bounds, Window};

/// A rectangle filled with one glyph.
#[derive(Debug, Clone)]
pub struct SimpleWindow {
    pub bounds: Bounds,
    pub fill: char,
    pub style: Style,
}

impl SimpleWindow {
    pub fn new(bounds: Bounds, style: Style) -> Self {
        Self {
            bounds,
            fill: ' ',
            style,
        }
    }

    pub fn with_fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }
}

impl Window for SimpleWindow {
    fn draw(&mut self, surface: &mut Surface) {
        surface.fill(self.bounds, self.fill, self.style);
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_fills_inclusive_bounds() {
        let mut s = Surface::new(6, 4);
        let mut w = SimpleWindow::new(Bounds::new(1, 1, 3, 2), Style::default()).with_fill('#');
        w.draw(&mut s);
        assert_eq!(s.symbol(1, 1), Some("#"));
        assert_eq!(s.symbol(3, 2), Some("#"));
        assert_eq!(s.symbol(4, 2), Some(" "));
        assert_eq!(s.symbol(1, 3), Some(" "));
        assert_eq!(w.size(), (2, 1));
    }
}
