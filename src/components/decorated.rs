use ratatui::style::Style;

use super::SimpleWindow;
use crate::surface::Surface;
use crate::theme;
use crate::window::{Bounds, Window};

/// A simple window with a border, a title on the top row and a drop shadow.
///
/// The top row doubles as the move handle and the bottom-right border corner
/// as the resize handle, so the chrome marks both for the user.
#[derive(Debug, Clone)]
pub struct DecoratedWindow {
    pub base: SimpleWindow,
    pub title: String,
}

impl DecoratedWindow {
    pub fn new(title: impl Into<String>, bounds: Bounds, style: Style) -> Self {
        Self {
            base: SimpleWindow::new(bounds, style),
            title: title.into(),
        }
    }

    pub fn style(&self) -> Style {
        self.base.style
    }

    fn draw_shadow(&self, surface: &mut Surface) {
        let Bounds { x0, y0, x1, y1 } = self.base.bounds;
        for x in x0 + 1..=x1 + 1 {
            surface.set_background(x, y1 + 1, theme::shadow_bg());
        }
        for y in y0 + 1..=y1 + 1 {
            surface.set_background(x1 + 1, y, theme::shadow_bg());
        }
    }
}

impl Window for DecoratedWindow {
    fn draw(&mut self, surface: &mut Surface) {
        self.base.draw(surface);
        let b = self.base.bounds;
        let chrome = self.base.style.fg(theme::decoration_fg());
        surface.draw_border(b, chrome);
        surface.print_max(b.x0 + 2, b.y0, Some(b.x1), &self.title, chrome);
        self.draw_shadow(surface);
    }

    fn bounds(&self) -> Bounds {
        self.base.bounds
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.base.bounds = bounds;
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }
}
