use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use ratatui::style::Style;

use super::DecoratedWindow;
use crate::surface::Surface;
use crate::window::{Bounds, Window};

const DEFAULT_MAX_LINES: usize = 2000;
static GLOBAL_LOG: OnceLock<TextLog> = OnceLock::new();

/// Install the log that `tracing` output is routed to. Only the first call
/// wins.
pub fn set_global_log(log: TextLog) -> bool {
    GLOBAL_LOG.set(log).is_ok()
}

pub fn global_log() -> Option<TextLog> {
    GLOBAL_LOG.get().cloned()
}

#[derive(Debug)]
struct TextBuffer {
    text: String,
    max_lines: usize,
    dirty: bool,
}

impl TextBuffer {
    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.dirty = true;
        let lines = self.text.matches('\n').count() + 1;
        if lines > self.max_lines {
            let excess = lines - self.max_lines;
            if let Some((pos, _)) = self.text.match_indices('\n').nth(excess - 1) {
                self.text.drain(..=pos);
            }
        }
    }
}

/// Shared, append-only text behind a [`TextWindow`].
///
/// Clones share the same buffer, so a key handler, a `tracing` writer and the
/// window itself can all hold one. Only the newest `max_lines` lines are
/// kept.
#[derive(Clone, Debug)]
pub struct TextLog {
    inner: Arc<Mutex<TextBuffer>>,
}

impl Default for TextLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl TextLog {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TextBuffer {
                text: String::new(),
                max_lines: max_lines.max(1),
                dirty: false,
            })),
        }
    }

    pub fn push_str(&self, s: &str) {
        if let Ok(mut buffer) = self.inner.lock() {
            buffer.push_str(s);
        }
    }

    pub fn push(&self, c: char) {
        let mut utf8 = [0u8; 4];
        self.push_str(c.encode_utf8(&mut utf8));
    }

    pub fn text(&self) -> String {
        self.inner
            .lock()
            .map(|buffer| buffer.text.clone())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_string).collect()
    }

    /// Whether text was appended since the last call.
    pub fn take_dirty(&self) -> bool {
        self.inner
            .lock()
            .map(|mut buffer| std::mem::take(&mut buffer.dirty))
            .unwrap_or(false)
    }
}

impl Write for TextLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Decorated window showing a [`TextLog`].
///
/// With `tail` set only the newest lines that fit are shown, which makes it
/// usable as a scrolling console.
#[derive(Debug, Clone)]
pub struct TextWindow {
    pub frame: DecoratedWindow,
    pub log: TextLog,
    pub tail: bool,
}

impl TextWindow {
    pub fn new(title: impl Into<String>, bounds: Bounds, style: Style, log: TextLog) -> Self {
        Self {
            frame: DecoratedWindow::new(title, bounds, style),
            log,
            tail: false,
        }
    }

    pub fn tail(mut self, tail: bool) -> Self {
        self.tail = tail;
        self
    }

    /// Rows available for text inside the border.
    fn visible_rows(&self) -> usize {
        (self.frame.bounds().height() - 1).max(0) as usize
    }
}

impl Window for TextWindow {
    fn draw(&mut self, surface: &mut Surface) {
        self.log.take_dirty();
        self.frame.draw(surface);
        let b = self.frame.bounds();
        let style = self.frame.style();
        let rows = self.visible_rows();
        let mut lines = self.log.lines();
        if self.tail && lines.len() > rows {
            lines.drain(..lines.len() - rows);
        }
        let x = b.x0 + 1;
        for (i, line) in lines.iter().enumerate() {
            let y = b.y0 + 1 + i as i32;
            if x >= b.x1 - 1 || y >= b.y1 {
                break;
            }
            surface.print_max(x, y, Some(b.x1), line, style);
        }
    }

    fn bounds(&self) -> Bounds {
        self.frame.bounds()
    }

    fn set_bounds(&mut self, bounds: Bounds) {
        self.frame.set_bounds(bounds);
    }

    fn title(&self) -> Option<&str> {
        self.frame.title()
    }

    fn take_changed(&mut self) -> bool {
        self.log.take_dirty()
    }
}
