mod window_manager;

use crate::surface::Surface;

pub use window_manager::{
    ClickOutcome, DragOutcome, EXIT_MENU, KeyHandler, RuneHandler, WindowManager,
};

/// Smallest width (`x1 - x0`) a window may be resized to.
pub const MIN_WINDOW_WIDTH: i32 = 3;
/// Smallest height (`y1 - y0`) a window may be resized to.
pub const MIN_WINDOW_HEIGHT: i32 = 2;

/// Inclusive cell rectangle.
///
/// Both corners are part of the box, so a window whose border is drawn on
/// `x0`/`x1`/`y0`/`y1` can be clicked on that border. Coordinates are signed
/// because a window may be dragged partially off the left or top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bounds {
    /// Build bounds from two corners, normalizing so that `x0 <= x1` and
    /// `y0 <= y1`.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Bounds anchored at `(x, y)` spanning `width` by `height` cells past the
    /// origin, i.e. `x1 = x + width`.
    pub fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width.max(0), y + height.max(0))
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn is_top_edge(&self, y: i32) -> bool {
        y == self.y0
    }

    pub fn is_bottom_right(&self, x: i32, y: i32) -> bool {
        x == self.x1 && y == self.y1
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    /// Move the bottom-right corner by `(dx, dy)`.
    ///
    /// Returns `None` when the result would be narrower or shorter than
    /// [`MIN_WINDOW_WIDTH`] / [`MIN_WINDOW_HEIGHT`].
    pub fn grown(&self, dx: i32, dy: i32) -> Option<Self> {
        let next = Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            ..*self
        };
        (next.width() >= MIN_WINDOW_WIDTH && next.height() >= MIN_WINDOW_HEIGHT).then_some(next)
    }
}

/// Capability every surface managed by [`WindowManager`] provides.
///
/// Coordinates passed to `click` and `pointer_move` are absolute screen cells;
/// the manager only calls them for points inside [`Window::bounds`]. Both
/// return `true` when the window changed visibly and the screen needs a
/// repaint.
pub trait Window {
    fn draw(&mut self, surface: &mut Surface);

    fn bounds(&self) -> Bounds;

    fn set_bounds(&mut self, bounds: Bounds);

    fn size(&self) -> (i32, i32) {
        let b = self.bounds();
        (b.width(), b.height())
    }

    fn click(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    fn pointer_move(&mut self, _x: i32, _y: i32) -> bool {
        false
    }

    /// The pointer moved off this window, or onto a window above it.
    fn pointer_leave(&mut self) -> bool {
        false
    }

    /// Whether the content changed on its own since the last call or draw,
    /// e.g. text written from another part of the program.
    fn take_changed(&mut self) -> bool {
        false
    }

    fn title(&self) -> Option<&str> {
        None
    }
}

/// Stable handle for a window in the stack. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub(crate) usize);

impl WindowId {
    pub fn index(self) -> usize {
        self.0
    }
}
