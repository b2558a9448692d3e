use crossterm::event::{KeyEvent, MouseButton};
use ratatui::style::Style;

use super::{Bounds, Window, WindowId};
use crate::menu::MenuBar;
use crate::surface::Surface;
use crate::theme;

/// Menu entry that stops the event loop when clicked.
pub const EXIT_MENU: &str = "Exit";

pub type RuneHandler = Box<dyn FnMut(char)>;
pub type KeyHandler = Box<dyn FnMut(KeyEvent)>;

/// What a button press ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The exit entry was clicked; the quit flag is now set.
    Quit,
    /// A menu entry other than exit consumed the click.
    Menu(String),
    /// The window under the pointer was behind another one and has been
    /// brought to the front. The click itself is not forwarded.
    Raised(WindowId),
    /// The window was already topmost and received the click.
    Forwarded(WindowId),
    /// Nothing under the pointer.
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Moved(WindowId),
    Resized(WindowId),
    /// The resize would have shrunk the window below its minimum size.
    Rejected(WindowId),
    /// The press was not on a drag handle, or not on any window.
    Ignored,
}

struct Slot {
    id: WindowId,
    window: Box<dyn Window>,
}

/// Owns the window stack and the menu bar and routes pointer input to them.
///
/// The stack is ordered bottom to top: the last window is drawn last and wins
/// every hit test. `draw` always repaints the whole surface back to front, so
/// occlusion needs no clipping logic.
pub struct WindowManager {
    stack: Vec<Slot>,
    next_id: usize,
    menu: MenuBar,
    background: Style,
    rune_handler: Option<RuneHandler>,
    key_handler: Option<KeyHandler>,
    /// Last window that received a hover event.
    hovered: Option<WindowId>,
    quit: bool,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(MenuBar::new())
    }
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("z_order", &self.z_order())
            .field("menu", &self.menu)
            .field("quit", &self.quit)
            .finish_non_exhaustive()
    }
}

impl WindowManager {
    pub fn new(menu: MenuBar) -> Self {
        Self {
            stack: Vec::new(),
            next_id: 0,
            menu,
            background: theme::desktop(),
            rune_handler: None,
            key_handler: None,
            hovered: None,
            quit: false,
        }
    }

    pub fn set_background(&mut self, style: Style) {
        self.background = style;
    }

    pub fn background(&self) -> Style {
        self.background
    }

    pub fn menu(&self) -> &MenuBar {
        &self.menu
    }

    /// Push a window on top of the stack.
    pub fn add_window(&mut self, window: impl Window + 'static) -> WindowId {
        self.add_boxed_window(Box::new(window))
    }

    pub fn add_boxed_window(&mut self, window: Box<dyn Window>) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            window_id = ?id,
            title = window.title().unwrap_or_default(),
            bounds = ?window.bounds(),
            "opened window"
        );
        self.stack.push(Slot { id, window });
        id
    }

    /// Take a window off the stack. The caller owns it afterwards.
    pub fn remove_window(&mut self, id: WindowId) -> Option<Box<dyn Window>> {
        let pos = self.position(id)?;
        tracing::debug!(window_id = ?id, "closing window");
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Some(self.stack.remove(pos).window)
    }

    /// Window ids from bottom to top.
    pub fn z_order(&self) -> Vec<WindowId> {
        self.stack.iter().map(|slot| slot.id).collect()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn topmost(&self) -> Option<WindowId> {
        self.stack.last().map(|slot| slot.id)
    }

    pub fn window(&self, id: WindowId) -> Option<&dyn Window> {
        self.stack
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.window.as_ref())
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut (dyn Window + 'static)> {
        self.stack
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| slot.window.as_mut())
    }

    fn position(&self, id: WindowId) -> Option<usize> {
        self.stack.iter().position(|slot| slot.id == id)
    }

    /// Topmost window whose bounds contain the point.
    ///
    /// Click, drag and hover dispatch all go through this so they always
    /// agree on which window owns a cell.
    pub fn find_top_window_at(&self, x: i32, y: i32) -> Option<WindowId> {
        self.stack
            .iter()
            .rev()
            .find(|slot| slot.window.bounds().contains(x, y))
            .map(|slot| slot.id)
    }

    /// Move a window to the top of the stack, keeping the relative order of
    /// the rest, and paint it so the screen matches the new order.
    pub fn raise(&mut self, id: WindowId, surface: &mut Surface) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let slot = self.stack.remove(pos);
        self.stack.push(slot);
        tracing::debug!(window_id = ?id, from = pos, "raised window");
        if let Some(top) = self.stack.last_mut() {
            top.window.draw(surface);
        }
        true
    }

    /// Handle the press edge of a mouse button.
    ///
    /// A click on a window that is not topmost only raises it; the click is
    /// swallowed and a second click is needed to reach the window.
    pub fn click(
        &mut self,
        button: MouseButton,
        x: i32,
        y: i32,
        surface: &mut Surface,
    ) -> ClickOutcome {
        if let Some(entry) = self.menu.entry_at(x, y) {
            let name = entry.name().to_string();
            if name == EXIT_MENU {
                tracing::info!("exit selected from menu");
                self.quit();
                return ClickOutcome::Quit;
            }
            tracing::debug!(menu = %name, "menu clicked");
            return ClickOutcome::Menu(name);
        }

        let Some(id) = self.find_top_window_at(x, y) else {
            return ClickOutcome::Missed;
        };
        if self.topmost() != Some(id) {
            self.raise(id, surface);
            return ClickOutcome::Raised(id);
        }
        tracing::trace!(window_id = ?id, ?button, x, y, "click forwarded");
        let dirty = self
            .window_mut(id)
            .map(|window| window.click(x, y))
            .unwrap_or(false);
        if dirty {
            self.draw(surface);
        }
        ClickOutcome::Forwarded(id)
    }

    /// Forward pointer hover to the topmost window under the pointer only.
    ///
    /// When the pointer ends up over a different window (or none), the window
    /// that got the previous hover is told it was left.
    pub fn pointer_move(&mut self, x: i32, y: i32, surface: &mut Surface) -> Option<WindowId> {
        let target = self.find_top_window_at(x, y);
        let mut dirty = false;
        if self.hovered != target
            && let Some(prev) = self.hovered.take()
            && let Some(window) = self.window_mut(prev)
        {
            dirty |= window.pointer_leave();
        }
        self.hovered = target;
        if let Some(id) = target
            && let Some(window) = self.window_mut(id)
        {
            dirty |= window.pointer_move(x, y);
        }
        if dirty {
            self.draw(surface);
        }
        target
    }

    /// Apply one step of a held-button drag from `(press_x, press_y)` to
    /// `(x, y)`.
    ///
    /// The window is looked up at the press point, not the current one, so a
    /// drag stays bound to the window it started on. A press on the top row
    /// moves the window; a press exactly on the bottom-right corner resizes
    /// it. Anything else is ignored.
    pub fn drag(
        &mut self,
        press_x: i32,
        press_y: i32,
        x: i32,
        y: i32,
        surface: &mut Surface,
    ) -> DragOutcome {
        let Some(id) = self.find_top_window_at(press_x, press_y) else {
            return DragOutcome::Ignored;
        };
        let (dx, dy) = (x - press_x, y - press_y);
        let outcome = match self.window_mut(id) {
            Some(window) => {
                let bounds = window.bounds();
                if bounds.is_top_edge(press_y) {
                    window.set_bounds(bounds.translated(dx, dy));
                    DragOutcome::Moved(id)
                } else if bounds.is_bottom_right(press_x, press_y) {
                    match bounds.grown(dx, dy) {
                        Some(next) => {
                            window.set_bounds(next);
                            DragOutcome::Resized(id)
                        }
                        None => DragOutcome::Rejected(id),
                    }
                } else {
                    DragOutcome::Ignored
                }
            }
            None => DragOutcome::Ignored,
        };
        match outcome {
            DragOutcome::Moved(_) | DragOutcome::Resized(_) => {
                tracing::trace!(window_id = ?id, dx, dy, ?outcome, "drag applied");
                self.draw(surface);
            }
            DragOutcome::Rejected(_) => {
                tracing::debug!(window_id = ?id, dx, dy, "resize below minimum size ignored");
            }
            DragOutcome::Ignored => {}
        }
        outcome
    }

    /// Recompute menu hover flags. Returns `true` when they changed.
    pub fn highlight_menu(&mut self, x: i32, y: i32) -> bool {
        self.menu.highlight(x, y)
    }

    /// Repaint everything: background, menu bar, then windows bottom to top.
    pub fn draw(&mut self, surface: &mut Surface) {
        surface.clear(self.background);
        self.menu.draw(surface);
        for slot in &mut self.stack {
            slot.window.draw(surface);
        }
    }

    /// Repaint everything if any window reports content that changed outside
    /// of input dispatch. Every window is asked so all flags are reset.
    pub fn redraw_changed(&mut self, surface: &mut Surface) -> bool {
        let mut changed = false;
        for slot in &mut self.stack {
            changed |= slot.window.take_changed();
        }
        if changed {
            self.draw(surface);
        }
        changed
    }

    pub fn bounds_of(&self, id: WindowId) -> Option<Bounds> {
        self.window(id).map(|window| window.bounds())
    }

    pub fn set_rune_handler(&mut self, handler: impl FnMut(char) + 'static) {
        self.rune_handler = Some(Box::new(handler));
    }

    pub fn set_key_handler(&mut self, handler: impl FnMut(KeyEvent) + 'static) {
        self.key_handler = Some(Box::new(handler));
    }

    /// Returns `false` when no rune handler is registered.
    pub fn handle_rune(&mut self, rune: char) -> bool {
        match self.rune_handler.as_mut() {
            Some(handler) => {
                handler(rune);
                true
            }
            None => false,
        }
    }

    /// Returns `false` when no key handler is registered.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.key_handler.as_mut() {
            Some(handler) => {
                handler(key);
                true
            }
            None => false,
        }
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        clicks: Vec<(i32, i32)>,
        moves: Vec<(i32, i32)>,
        leaves: usize,
        draws: usize,
    }

    struct Recorder {
        bounds: Bounds,
        glyph: char,
        log: Rc<RefCell<Log>>,
    }

    impl Recorder {
        fn new(bounds: Bounds, glyph: char) -> (Self, Rc<RefCell<Log>>) {
            let log = Rc::new(RefCell::new(Log::default()));
            (
                Self {
                    bounds,
                    glyph,
                    log: log.clone(),
                },
                log,
            )
        }
    }

    impl Window for Recorder {
        fn draw(&mut self, surface: &mut Surface) {
            self.log.borrow_mut().draws += 1;
            surface.fill(self.bounds, self.glyph, Style::default());
        }

        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn set_bounds(&mut self, bounds: Bounds) {
            self.bounds = bounds;
        }

        fn click(&mut self, x: i32, y: i32) -> bool {
            self.log.borrow_mut().clicks.push((x, y));
            false
        }

        fn pointer_move(&mut self, x: i32, y: i32) -> bool {
            self.log.borrow_mut().moves.push((x, y));
            false
        }

        fn pointer_leave(&mut self) -> bool {
            self.log.borrow_mut().leaves += 1;
            false
        }
    }

    fn surface() -> Surface {
        Surface::new(80, 30)
    }

    #[test]
    fn add_window_puts_new_window_on_top() {
        let mut wm = WindowManager::default();
        let (a, _) = Recorder::new(Bounds::new(0, 1, 10, 10), 'a');
        let (b, _) = Recorder::new(Bounds::new(5, 5, 15, 15), 'b');
        let a = wm.add_window(a);
        let b = wm.add_window(b);
        assert_eq!(wm.z_order(), vec![a, b]);
        assert_eq!(wm.topmost(), Some(b));
        assert_eq!(wm.find_top_window_at(6, 6), Some(b));
        assert_eq!(wm.find_top_window_at(1, 2), Some(a));
        assert_eq!(wm.find_top_window_at(50, 20), None);
    }

    #[test]
    fn raise_preserves_relative_order_of_others() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let ids: Vec<_> = (0..4)
            .map(|i| wm.add_window(Recorder::new(Bounds::new(i, 1, i + 5, 5), 'x').0))
            .collect();
        assert!(wm.raise(ids[1], &mut s));
        assert_eq!(wm.z_order(), vec![ids[0], ids[2], ids[3], ids[1]]);
        assert_eq!(wm.find_top_window_at(3, 3), Some(ids[1]));
    }

    #[test]
    fn raise_draws_the_raised_window() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let (a, log) = Recorder::new(Bounds::new(0, 1, 10, 10), 'a');
        let a = wm.add_window(a);
        wm.add_window(Recorder::new(Bounds::new(0, 1, 10, 10), 'b').0);
        wm.draw(&mut s);
        assert_eq!(s.symbol(5, 5), Some("b"));
        wm.raise(a, &mut s);
        assert_eq!(s.symbol(5, 5), Some("a"));
        assert_eq!(log.borrow().draws, 2);
    }

    #[test]
    fn click_on_covered_window_raises_without_forwarding() {
        // Intentional: the first click on a background window only brings it
        // to the front, like a desktop window manager.
        let mut wm = WindowManager::default();
        let mut s = surface();
        let (a, a_log) = Recorder::new(Bounds::new(0, 1, 10, 10), 'a');
        let (b, b_log) = Recorder::new(Bounds::new(5, 5, 15, 15), 'b');
        let a = wm.add_window(a);
        let b = wm.add_window(b);

        assert_eq!(
            wm.click(MouseButton::Left, 2, 2, &mut s),
            ClickOutcome::Raised(a)
        );
        assert!(a_log.borrow().clicks.is_empty());
        assert_eq!(wm.topmost(), Some(a));

        assert_eq!(
            wm.click(MouseButton::Left, 2, 2, &mut s),
            ClickOutcome::Forwarded(a)
        );
        assert_eq!(a_log.borrow().clicks, vec![(2, 2)]);

        // overlapping cell now belongs to a
        assert_eq!(
            wm.click(MouseButton::Left, 6, 6, &mut s),
            ClickOutcome::Forwarded(a)
        );
        assert!(b_log.borrow().clicks.is_empty());
        assert_eq!(
            wm.click(MouseButton::Left, 14, 14, &mut s),
            ClickOutcome::Raised(b)
        );
    }

    #[test]
    fn exit_menu_sets_quit_and_never_reaches_windows() {
        let mut wm = WindowManager::new(MenuBar::with_entries(["File", "Exit"]));
        let mut s = surface();
        let (w, log) = Recorder::new(Bounds::new(0, 0, 20, 10), 'w');
        wm.add_window(w);
        assert_eq!(
            wm.click(MouseButton::Left, 1, 0, &mut s),
            ClickOutcome::Menu("File".into())
        );
        assert!(!wm.should_quit());
        assert_eq!(wm.click(MouseButton::Left, 7, 0, &mut s), ClickOutcome::Quit);
        assert!(wm.should_quit());
        assert!(log.borrow().clicks.is_empty());
    }

    #[test]
    fn pointer_move_reaches_topmost_window_only() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let (a, a_log) = Recorder::new(Bounds::new(0, 1, 10, 10), 'a');
        let (b, b_log) = Recorder::new(Bounds::new(5, 5, 15, 15), 'b');
        wm.add_window(a);
        let b = wm.add_window(b);
        assert_eq!(wm.pointer_move(6, 6, &mut s), Some(b));
        assert_eq!(wm.pointer_move(40, 20, &mut s), None);
        assert!(a_log.borrow().moves.is_empty());
        assert_eq!(b_log.borrow().moves, vec![(6, 6)]);
    }

    #[test]
    fn leaving_a_window_notifies_it_once() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let (a, a_log) = Recorder::new(Bounds::new(0, 1, 10, 10), 'a');
        let (b, b_log) = Recorder::new(Bounds::new(5, 5, 15, 15), 'b');
        wm.add_window(a);
        wm.add_window(b);
        wm.pointer_move(2, 2, &mut s);
        wm.pointer_move(3, 2, &mut s);
        assert_eq!(a_log.borrow().leaves, 0);
        // onto the window covering `a`
        wm.pointer_move(6, 6, &mut s);
        assert_eq!(a_log.borrow().leaves, 1);
        assert_eq!(a_log.borrow().moves, vec![(2, 2), (3, 2)]);
        wm.pointer_move(40, 20, &mut s);
        wm.pointer_move(41, 20, &mut s);
        assert_eq!(b_log.borrow().leaves, 1);
        assert_eq!(a_log.borrow().leaves, 1);
    }

    #[test]
    fn drag_on_title_row_moves_window() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let id = wm.add_window(Recorder::new(Bounds::new(10, 5, 30, 15), 'w').0);
        assert_eq!(wm.drag(12, 5, 14, 7, &mut s), DragOutcome::Moved(id));
        assert_eq!(wm.bounds_of(id), Some(Bounds::new(12, 7, 32, 17)));
    }

    #[test]
    fn drag_on_corner_resizes_and_rejects_degenerate_size() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let id = wm.add_window(Recorder::new(Bounds::new(10, 5, 30, 15), 'w').0);
        assert_eq!(wm.drag(30, 15, 31, 16, &mut s), DragOutcome::Resized(id));
        assert_eq!(wm.bounds_of(id), Some(Bounds::new(10, 5, 31, 16)));
        assert_eq!(wm.drag(31, 16, 10, 5, &mut s), DragOutcome::Rejected(id));
        assert_eq!(wm.bounds_of(id), Some(Bounds::new(10, 5, 31, 16)));
    }

    #[test]
    fn drag_from_interior_or_empty_space_is_ignored() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let id = wm.add_window(Recorder::new(Bounds::new(10, 5, 30, 15), 'w').0);
        assert_eq!(wm.drag(20, 10, 25, 12, &mut s), DragOutcome::Ignored);
        assert_eq!(wm.drag(50, 20, 52, 22, &mut s), DragOutcome::Ignored);
        assert_eq!(wm.bounds_of(id), Some(Bounds::new(10, 5, 30, 15)));
    }

    #[test]
    fn drag_stays_bound_to_window_under_press_point() {
        let mut wm = WindowManager::default();
        let mut s = surface();
        let low = wm.add_window(Recorder::new(Bounds::new(0, 2, 10, 8), 'l').0);
        let high = wm.add_window(Recorder::new(Bounds::new(20, 2, 30, 8), 'h').0);
        // press on low's title row, pointer lands on high
        assert_eq!(wm.drag(3, 2, 23, 2, &mut s), DragOutcome::Moved(low));
        assert_eq!(wm.bounds_of(low), Some(Bounds::new(20, 2, 30, 8)));
        assert_eq!(wm.bounds_of(high), Some(Bounds::new(20, 2, 30, 8)));
    }

    #[test]
    fn draw_is_back_to_front_and_deterministic() {
        let mut wm = WindowManager::new(MenuBar::with_entries(["File"]));
        let mut s = surface();
        wm.add_window(Recorder::new(Bounds::new(0, 1, 10, 10), 'a').0);
        wm.add_window(Recorder::new(Bounds::new(5, 5, 15, 15), 'b').0);
        wm.draw(&mut s);
        let first = s.clone();
        wm.draw(&mut s);
        assert_eq!(first, s);
        assert_eq!(s.symbol(6, 6), Some("b"));
        assert_eq!(s.symbol(1, 2), Some("a"));
        assert_eq!(s.symbol(1, 0), Some("F"));
        assert_eq!(s.cell(40, 20).unwrap().bg, wm.background().bg.unwrap());
    }

    #[test]
    fn remove_window_drops_it_from_hit_testing() {
        let mut wm = WindowManager::default();
        let a = wm.add_window(Recorder::new(Bounds::new(0, 1, 10, 10), 'a').0);
        let b = wm.add_window(Recorder::new(Bounds::new(0, 1, 10, 10), 'b').0);
        assert!(wm.remove_window(b).is_some());
        assert!(wm.remove_window(b).is_none());
        assert_eq!(wm.find_top_window_at(2, 2), Some(a));
        assert_eq!(wm.len(), 1);
    }

    #[test]
    fn handlers_are_single_slot() {
        let mut wm = WindowManager::default();
        assert!(!wm.handle_rune('x'));
        let seen = Rc::new(RefCell::new(String::new()));
        let first = seen.clone();
        wm.set_rune_handler(move |c| first.borrow_mut().push(c.to_ascii_uppercase()));
        let second = seen.clone();
        wm.set_rune_handler(move |c| second.borrow_mut().push(c));
        assert!(wm.handle_rune('x'));
        assert_eq!(seen.borrow().as_str(), "x");
    }
}
