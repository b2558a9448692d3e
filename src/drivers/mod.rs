pub mod console;
pub mod keyboard;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

use crate::surface::Surface;

/// Source of terminal input events.
pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }
}

/// Sink that shows a [`Surface`] on a terminal.
pub trait OutputDriver {
    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    /// Current terminal size as `(columns, rows)`.
    fn size(&mut self) -> io::Result<(u16, u16)>;

    /// Flush the surface to the terminal.
    fn present(&mut self, surface: &Surface) -> io::Result<()>;

    /// Forget what the terminal is believed to show so the next `present`
    /// repaints every cell.
    fn sync(&mut self) -> io::Result<()>;
}
