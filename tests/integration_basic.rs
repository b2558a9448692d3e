use cell_wm::components::{DecoratedWindow, SimpleWindow};
use cell_wm::menu::MenuBar;
use cell_wm::surface::Surface;
use cell_wm::window::{Bounds, ClickOutcome, DragOutcome, Window, WindowManager};
use crossterm::event::MouseButton;
use ratatui::style::Style;

fn desktop() -> (WindowManager, Surface) {
    let wm = WindowManager::new(MenuBar::with_entries([
        "=", "File", "Edit", "Search", "Run", "Exit",
    ]));
    (wm, Surface::new(100, 40))
}

#[test]
fn menu_entries_are_packed_left_to_right() {
    let (wm, _) = desktop();
    let entries = wm.menu().entries();
    assert_eq!(entries[0].x(), 0);
    for pair in entries.windows(2) {
        assert_eq!(pair[1].x(), pair[0].x() + pair[0].width());
    }
    assert_eq!(entries[1].width(), "File".len() as i32 + 2);
}

#[test]
fn most_recently_raised_window_wins_hit_test() {
    let (mut wm, mut s) = desktop();
    let a = wm.add_window(SimpleWindow::new(Bounds::new(0, 1, 20, 10), Style::default()));
    let b = wm.add_window(SimpleWindow::new(Bounds::new(10, 5, 30, 15), Style::default()));
    assert_eq!(wm.find_top_window_at(12, 7), Some(b));
    wm.raise(a, &mut s);
    assert_eq!(wm.find_top_window_at(12, 7), Some(a));
    assert_eq!(wm.find_top_window_at(25, 12), Some(b));
}

#[test]
fn first_click_on_background_window_only_raises_it() {
    // Intentional: a covered window needs one click to come forward and a
    // second one to receive input.
    let (mut wm, mut s) = desktop();
    let a = wm.add_window(SimpleWindow::new(Bounds::new(0, 1, 20, 10), Style::default()));
    wm.add_window(SimpleWindow::new(Bounds::new(10, 5, 30, 15), Style::default()));
    assert_eq!(
        wm.click(MouseButton::Left, 12, 7, &mut s),
        ClickOutcome::Forwarded(wm.topmost().unwrap())
    );
    assert_eq!(wm.click(MouseButton::Left, 2, 2, &mut s), ClickOutcome::Raised(a));
    assert_eq!(wm.click(MouseButton::Left, 2, 2, &mut s), ClickOutcome::Forwarded(a));
}

#[test]
fn title_row_moves_and_corner_resizes() {
    let (mut wm, mut s) = desktop();
    let id = wm.add_window(DecoratedWindow::new(
        "w",
        Bounds::new(10, 5, 30, 15),
        Style::default(),
    ));
    assert_eq!(wm.drag(12, 5, 14, 7, &mut s), DragOutcome::Moved(id));
    assert_eq!(wm.bounds_of(id), Some(Bounds::new(12, 7, 32, 17)));

    assert_eq!(wm.drag(32, 17, 33, 18, &mut s), DragOutcome::Resized(id));
    assert_eq!(wm.bounds_of(id), Some(Bounds::new(12, 7, 33, 18)));

    assert_eq!(wm.drag(33, 18, 12, 7, &mut s), DragOutcome::Rejected(id));
    assert_eq!(wm.bounds_of(id), Some(Bounds::new(12, 7, 33, 18)));
}

#[test]
fn exit_entry_sets_quit_flag() {
    let (mut wm, mut s) = desktop();
    let exit = wm.menu().entries().last().unwrap().x();
    assert_eq!(wm.click(MouseButton::Left, exit, 0, &mut s), ClickOutcome::Quit);
    assert!(wm.should_quit());
}

#[test]
fn redraw_is_deterministic_and_respects_z_order() {
    let (mut wm, mut s) = desktop();
    let back = Bounds::new(2, 2, 30, 12);
    wm.add_window(DecoratedWindow::new("back", back, Style::default()));
    let front = SimpleWindow::new(Bounds::new(10, 5, 20, 8), Style::default());
    wm.add_window(front.with_fill('#'));
    wm.draw(&mut s);
    let first = s.clone();
    wm.draw(&mut s);
    assert_eq!(first, s);
    assert_eq!(s.symbol(12, 6), Some("#"));
    assert_eq!(s.symbol(2, 2), Some("┌"));
    let size = wm.window(wm.topmost().unwrap()).unwrap().size();
    assert_eq!(size, (10, 3));
}
