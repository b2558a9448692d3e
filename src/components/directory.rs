use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use ratatui::style::Style;

use super::DecoratedWindow;
use crate::surface::Surface;
use crate::theme;
use crate::window::{Bounds, Window};

pub const DEFAULT_WIDTH: i32 = 80;
pub const DEFAULT_HEIGHT: i32 = 30;
const SIZE_COLUMN: i32 = 16;
const TIME_COLUMN: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl FileInfo {
    fn from_metadata(name: String, meta: &fs::Metadata) -> Self {
        Self {
            name,
            size: meta.len(),
            modified: meta.modified().ok(),
        }
    }

    pub fn size_text(&self) -> String {
        dotted(self.size)
    }

    pub fn time_text(&self) -> String {
        self.modified
            .map(|t| DateTime::<Local>::from(t).format("%b %d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Group digits in threes with dots: `23456789` -> `23.456.789`.
pub fn dotted(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// List `path` sorted by `key`. A plain file lists as itself.
pub fn list_path(path: &Path, key: SortKey, reverse: bool) -> io::Result<Vec<FileInfo>> {
    let meta = fs::symlink_metadata(path)?;
    let mut files = if meta.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            match entry.metadata() {
                Ok(meta) => files.push(FileInfo::from_metadata(name, &meta)),
                Err(err) => tracing::debug!(file = %name, %err, "skipping unreadable entry"),
            }
        }
        files
    } else {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        vec![FileInfo::from_metadata(name, &meta)]
    };
    let order = |a: &FileInfo, b: &FileInfo| -> Ordering {
        match key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Time => a.modified.cmp(&b.modified),
        }
    };
    files.sort_by(|a, b| if reverse { order(b, a) } else { order(a, b) });
    Ok(files)
}

/// Decorated window listing one directory in Name / Size / MTime columns.
///
/// Clicking a column label on the header row sorts by that column; clicking
/// the active column again flips the direction. Hovering a label highlights
/// it.
#[derive(Debug, Clone)]
pub struct DirectoryWindow {
    frame: DecoratedWindow,
    dir: PathBuf,
    files: Vec<FileInfo>,
    error: Option<String>,
    sort: SortKey,
    reverse: bool,
    hover: Option<SortKey>,
}

impl DirectoryWindow {
    pub fn open(dir: impl Into<PathBuf>, x: i32, y: i32) -> Self {
        Self::with_bounds(
            dir,
            Bounds::from_origin(x, y, DEFAULT_WIDTH, DEFAULT_HEIGHT),
        )
    }

    pub fn with_bounds(dir: impl Into<PathBuf>, bounds: Bounds) -> Self {
        let dir = dir.into();
        let title = format!(" {} ", dir.display());
        let mut win = Self {
            frame: DecoratedWindow::new(title, bounds, theme::listing()),
            dir,
            files: Vec::new(),
            error: None,
            sort: SortKey::Name,
            reverse: false,
            hover: None,
        };
        win.reload();
        win
    }

    pub fn reload(&mut self) {
        match list_path(&self.dir, self.sort, self.reverse) {
            Ok(files) => {
                self.files = files;
                self.error = None;
            }
            Err(err) => {
                tracing::debug!(dir = %self.dir.display(), %err, "listing failed");
                self.files.clear();
                self.error = Some(format!("{}: {}", self.dir.display(), err));
            }
        }
    }

    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    pub fn sort(&self) -> (SortKey, bool) {
        (self.sort, self.reverse)
    }

    pub fn hovered(&self) -> Option<SortKey> {
        self.hover
    }

    fn header_row(&self) -> i32 {
        self.frame.bounds().y0 + 1
    }

    /// Columns of the two dividers: before Size and before MTime.
    fn dividers(&self) -> (i32, i32) {
        let x1 = self.frame.bounds().x1;
        (x1 - SIZE_COLUMN - TIME_COLUMN, x1 - TIME_COLUMN)
    }

    fn column_at(&self, x: i32) -> Option<SortKey> {
        let b = self.frame.bounds();
        let (size_div, time_div) = self.dividers();
        if x > b.x0 + 1 && x < size_div {
            Some(SortKey::Name)
        } else if x > size_div && x < time_div {
            Some(SortKey::Size)
        } else if x > time_div && x < b.x1 {
            Some(SortKey::Time)
        } else {
            None
        }
    }

    fn select(&mut self, key: SortKey) {
        if self.sort == key {
            self.reverse = !self.reverse;
        } else {
            self.sort = key;
            self.reverse = false;
        }
        self.reload();
    }

    fn label_style(&self, key: SortKey) -> Style {
        if self.hover == Some(key) {
            theme::listing_header_hover()
        } else {
            self.frame.style()
        }
    }

    fn draw_header(&self, surface: &mut Surface) {
        let b = self.frame.bounds();
        let y = self.header_row();
        let (size_div, time_div) = self.dividers();
        let name_x = b.x0 + 1 + (size_div - b.x0 - 1) / 2 - 2;
        surface.print(name_x, y, "Name", self.label_style(SortKey::Name));
        surface.print(
            size_div + SIZE_COLUMN / 2 - 2,
            y,
            "Size",
            self.label_style(SortKey::Size),
        );
        surface.print(
            time_div + TIME_COLUMN / 2 - 2,
            y,
            "MTime",
            self.label_style(SortKey::Time),
        );
        let arrow = if self.reverse { '↑' } else { '↓' };
        surface.put(b.x0 + 1, y, arrow, self.frame.style());
    }

    fn draw_dividers(&self, surface: &mut Surface) {
        let b = self.frame.bounds();
        let glyphs = surface.borders();
        let style = self.frame.style().fg(theme::decoration_fg());
        let (size_div, time_div) = self.dividers();
        for x in [size_div, time_div] {
            if x <= b.x0 || x >= b.x1 {
                continue;
            }
            surface.put(x, b.y0, glyphs.top_tee, style);
            surface.put(x, b.y1, glyphs.bottom_tee, style);
            for y in b.y0 + 1..b.y1 {
                surface.put(x, y, glyphs.vertical, style);
            }
        }
    }

    fn draw_rows(&self, surface: &mut Surface) {
        let b = self.frame.bounds();
        let style = self.frame.style();
        let (size_div, time_div) = self.dividers();
        let first = b.y0 + 2;
        if let Some(err) = &self.error {
            surface.print_max(b.x0 + 2, first, Some(b.x1), err, style);
            return;
        }
        for (row, file) in (first..b.y1).zip(&self.files) {
            surface.print_max(b.x0 + 2, row, Some(size_div), &file.name, style);
            let size = file.size_text();
            surface.print_max(
                time_div - size.chars().count() as i32 - 1,
                row,
                Some(time_div),
                &size,
                style,
            );
            surface.print_max(time_div + 2, row, Some(b.x1), &file.time_text(), style);
        }
    }
}

impl Window for DirectoryWindow {
    fn draw(&mut self, surface: &mut Surface) {
        self.frame.draw(surface);
        self.draw_dividers(surface);
        self.draw_header(surface);
        self.draw_rows(surface);
    }

    fn bounds(&self) -> Bounds {
        self.frame.bounds()
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.frame.set_bounds(bounds);
    }

    fn click(&mut self, x: i32, y: i32) -> bool {
        if y != self.header_row() {
            return false;
        }
        match self.column_at(x) {
            Some(key) => {
                self.select(key);
                true
            }
            None => false,
        }
    }

    fn pointer_move(&mut self, x: i32, y: i32) -> bool {
        let hover = if y == self.header_row() {
            self.column_at(x)
        } else {
            None
        };
        let changed = hover != self.hover;
        self.hover = hover;
        changed
    }

    fn pointer_leave(&mut self) -> bool {
        self.hover.take().is_some()
    }

    fn title(&self) -> Option<&str> {
        self.frame.title()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, len) in [("beta", 300usize), ("alpha", 20), ("gamma", 1000)] {
            let mut f = File::create(dir.path().join(name)).unwrap();
            f.write_all(&vec![b'x'; len]).unwrap();
        }
        dir
    }

    fn names(w: &DirectoryWindow) -> Vec<&str> {
        w.files().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn dotted_groups_thousands() {
        assert_eq!(dotted(0), "0");
        assert_eq!(dotted(999), "999");
        assert_eq!(dotted(1000), "1.000");
        assert_eq!(dotted(23456789), "23.456.789");
        assert_eq!(dotted(123456), "123.456");
    }

    #[test]
    fn lists_sorted_by_name_then_size() {
        let dir = fixture();
        let by_name = list_path(dir.path(), SortKey::Name, false).unwrap();
        let names: Vec<_> = by_name.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        let by_size = list_path(dir.path(), SortKey::Size, true).unwrap();
        let sizes: Vec<_> = by_size.iter().map(|f| f.size).collect();
        assert_eq!(sizes, vec![1000, 300, 20]);
    }

    #[test]
    fn header_clicks_select_and_toggle_sort() {
        let dir = fixture();
        let mut w = DirectoryWindow::with_bounds(dir.path(), Bounds::new(0, 1, 60, 20));
        let header = 2;
        // size column sits between x1-31 and x1-15
        assert!(w.click(37, header));
        assert_eq!(w.sort(), (SortKey::Size, false));
        assert_eq!(names(&w), vec!["alpha", "beta", "gamma"]);
        assert!(w.click(37, header));
        assert_eq!(w.sort(), (SortKey::Size, true));
        assert_eq!(names(&w), vec!["gamma", "beta", "alpha"]);
        // back to name resets direction
        assert!(w.click(10, header));
        assert_eq!(w.sort(), (SortKey::Name, false));
        assert!(w.click(10, header));
        assert_eq!(names(&w), vec!["gamma", "beta", "alpha"]);
        // body rows and dividers are not sort targets
        assert!(!w.click(10, 5));
        assert!(!w.click(29, header));
    }

    #[test]
    fn hover_highlights_header_label() {
        let dir = fixture();
        let mut w = DirectoryWindow::with_bounds(dir.path(), Bounds::new(0, 1, 60, 20));
        assert!(w.pointer_move(50, 2));
        assert_eq!(w.hovered(), Some(SortKey::Time));
        assert!(!w.pointer_move(51, 2));
        assert!(w.pointer_move(50, 3));
        assert_eq!(w.hovered(), None);

        w.pointer_move(10, 2);
        let mut s = Surface::new(70, 25);
        w.draw(&mut s);
        // "Name" label centered in the name column
        let name_x = 1 + (29 - 1) / 2 - 2;
        assert_eq!(s.symbol(name_x, 2), Some("N"));
        assert_eq!(
            s.cell(name_x, 2).unwrap().bg,
            theme::listing_header_hover().bg.unwrap()
        );
    }

    #[test]
    fn leaving_clears_header_hover() {
        let dir = fixture();
        let mut w = DirectoryWindow::with_bounds(dir.path(), Bounds::new(0, 1, 60, 20));
        w.pointer_move(10, 2);
        assert!(w.pointer_leave());
        assert_eq!(w.hovered(), None);
        assert!(!w.pointer_leave());
    }

    #[test]
    fn rows_show_name_size_and_dividers() {
        let dir = fixture();
        let mut w = DirectoryWindow::with_bounds(dir.path(), Bounds::new(0, 1, 60, 20));
        let mut s = Surface::new(70, 25);
        w.draw(&mut s);
        // first row is y0 + 2
        assert_eq!(s.symbol(2, 3), Some("a"));
        // "20" right-aligned before the time divider at x=45
        assert_eq!(s.symbol(42, 3), Some("2"));
        assert_eq!(s.symbol(43, 3), Some("0"));
        assert_eq!(s.symbol(29, 1), Some("┬"));
        assert_eq!(s.symbol(45, 10), Some("│"));
        assert_eq!(s.symbol(45, 20), Some("┴"));
    }

    #[test]
    fn missing_directory_shows_error_row() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let mut w = DirectoryWindow::with_bounds(&missing, Bounds::new(0, 1, 60, 10));
        assert!(w.files().is_empty());
        let mut s = Surface::new(70, 12);
        w.draw(&mut s);
        assert_eq!(s.symbol(2, 3), Some("/"));
    }
}
