//! Time-of-day readout in the top-right corner of the menu row.
//!
//! The clock runs on its own thread but never touches the surface. It sends
//! [`ClockTick`]s to the dispatch loop, which owns the surface and paints the
//! readout between events. The thread exits once the receiving side is
//! dropped.
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::menu::MENU_ROW;
use crate::surface::Surface;
use crate::theme;

pub const DEFAULT_CLOCK_INTERVAL: Duration = Duration::from_millis(500);

/// Width reserved for `HH:MM:SS` plus one cell of right margin.
pub const CLOCK_WIDTH: i32 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTick {
    pub text: String,
}

impl ClockTick {
    pub fn at(time: DateTime<Local>) -> Self {
        Self {
            text: time.format("%H:%M:%S").to_string(),
        }
    }

    pub fn now() -> Self {
        Self::at(Local::now())
    }
}

/// Paint `text` at `(width - 9, 0)` in the menu style.
pub fn paint_time(surface: &mut Surface, text: &str) {
    let (width, _) = surface.size();
    surface.print(width - CLOCK_WIDTH, MENU_ROW, text, theme::menu());
}

pub struct Clock {
    receiver: Receiver<ClockTick>,
    handle: Option<JoinHandle<()>>,
}

impl Clock {
    /// Start the ticking thread. The first tick is sent immediately.
    pub fn spawn(interval: Duration) -> std::io::Result<Self> {
        let (tx, receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("clock".into())
            .spawn(move || {
                loop {
                    if tx.send(ClockTick::now()).is_err() {
                        break;
                    }
                    thread::sleep(interval);
                }
                tracing::trace!("clock thread stopped");
            })?;
        Ok(Self {
            receiver,
            handle: Some(handle),
        })
    }

    /// Newest pending tick, discarding older ones.
    pub fn latest(&self) -> Option<ClockTick> {
        self.receiver.try_iter().last()
    }

    /// Stop the clock and wait for its thread.
    pub fn stop(mut self) {
        let handle = self.handle.take();
        drop(self);
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}
