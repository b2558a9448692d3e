//! Top-row menu strip.
//!
//! Entries are packed left to right in insertion order. Each entry is
//! `name` plus one padding cell on each side, so the extents follow directly
//! from the display widths of the names.
use unicode_width::UnicodeWidthStr;

use crate::surface::Surface;
use crate::theme;

/// Row the menu bar occupies.
pub const MENU_ROW: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    name: String,
    x: i32,
    y: i32,
    width: i32,
    highlighted: bool,
}

impl MenuEntry {
    fn new(name: String) -> Self {
        let width = name.width() as i32 + 2;
        Self {
            name,
            x: 0,
            y: MENU_ROW,
            width,
            highlighted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn highlighted(&self) -> bool {
        self.highlighted
    }

    /// Half-open on the right: `[x, x + width)` on the entry's row.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        y == self.y && x >= self.x && x < self.x + self.width
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuBar {
    entries: Vec<MenuEntry>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bar from names in display order.
    pub fn with_entries<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut bar = Self::new();
        for name in names {
            bar.add_menu(name);
        }
        bar
    }

    pub fn add_menu(&mut self, name: impl Into<String>) {
        self.entries.push(MenuEntry::new(name.into()));
        let mut x = 0;
        for entry in &mut self.entries {
            entry.x = x;
            entry.y = MENU_ROW;
            entry.width = entry.name.width() as i32 + 2;
            x += entry.width;
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entry_at(&self, x: i32, y: i32) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.contains(x, y))
    }

    /// Recompute hover flags for a pointer at `(x, y)`. Returns `true` when
    /// any flag changed.
    pub fn highlight(&mut self, x: i32, y: i32) -> bool {
        let mut changed = false;
        for entry in &mut self.entries {
            let hl = entry.contains(x, y);
            changed |= hl != entry.highlighted;
            entry.highlighted = hl;
        }
        changed
    }

    pub fn highlighted(&self) -> Option<&MenuEntry> {
        self.entries.iter().find(|entry| entry.highlighted)
    }

    pub fn draw(&self, surface: &mut Surface) {
        let (width, _) = surface.size();
        let base = theme::menu();
        let accent = theme::menu_accent();
        for x in 0..width {
            surface.put(x, MENU_ROW, ' ', base);
        }
        for entry in &self.entries {
            let (st, first) = if entry.highlighted {
                (
                    base.bg(theme::menu_highlight_bg()),
                    accent.bg(theme::menu_highlight_bg()),
                )
            } else {
                (base, accent)
            };
            let mut chars = entry.name.chars();
            let head: String = chars.next().into_iter().collect();
            let tail = chars.as_str();
            surface.print(entry.x, entry.y, " ", st);
            let next = surface.print(entry.x + 1, entry.y, &head, first);
            surface.print(next, entry.y, tail, st);
            surface.print(entry.x + entry.width - 1, entry.y, " ", st);
        }
    }
}
