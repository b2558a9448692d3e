//! Turns terminal events into window-manager calls.
//!
//! [`Dispatcher`] owns the [`WindowManager`], the mouse gesture state and the
//! key bindings. It only ever paints into a [`Surface`]; [`run`] wires it to
//! the input and output drivers and the clock.
use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use crate::clock::{self, Clock, ClockTick};
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::gesture::{Gesture, MouseGesture};
use crate::keybindings::{Action, KeyBindings, KeyCombo};
use crate::surface::Surface;
use crate::window::{ClickOutcome, WindowManager};

/// How long one idle pass waits for input. Kept well below the clock period
/// so the readout never lags.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What the caller should do after an event was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Continue,
    /// Repaint every terminal cell, not just the changed ones.
    Resync,
    Quit,
}

pub struct Dispatcher {
    wm: WindowManager,
    gesture: MouseGesture,
    bindings: KeyBindings,
    clock_text: Option<String>,
}

impl Dispatcher {
    pub fn new(wm: WindowManager) -> Self {
        Self {
            wm,
            gesture: MouseGesture::new(),
            bindings: KeyBindings::default(),
            clock_text: None,
        }
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.wm
    }

    pub fn window_manager_mut(&mut self) -> &mut WindowManager {
        &mut self.wm
    }

    pub fn gesture(&self) -> &MouseGesture {
        &self.gesture
    }

    pub fn clock_text(&self) -> Option<&str> {
        self.clock_text.as_deref()
    }

    /// Full repaint including the clock readout.
    pub fn redraw(&mut self, surface: &mut Surface) {
        self.wm.draw(surface);
        self.paint_clock(surface);
    }

    fn paint_clock(&self, surface: &mut Surface) {
        if let Some(text) = &self.clock_text {
            clock::paint_time(surface, text);
        }
    }

    /// Idle pass between input polls: observe the quit flag, repaint windows
    /// whose content changed on its own (the log window) and paint the
    /// newest clock tick, if any.
    pub fn idle(&mut self, tick: Option<ClockTick>, surface: &mut Surface) -> Response {
        if self.wm.should_quit() {
            return Response::Quit;
        }
        let redrawn = self.wm.redraw_changed(surface);
        if let Some(tick) = tick {
            self.clock_text = Some(tick.text);
            self.paint_clock(surface);
        } else if redrawn {
            self.paint_clock(surface);
        }
        Response::Continue
    }

    pub fn handle_event(&mut self, event: &Event, surface: &mut Surface) -> Response {
        if self.wm.should_quit() {
            return Response::Quit;
        }
        match event {
            Event::Key(key) => self.handle_key(*key, surface),
            Event::Mouse(mouse) => self.handle_mouse(mouse, surface),
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                surface.resize(*width, *height);
                self.redraw(surface);
                Response::Resync
            }
            _ => Response::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, surface: &mut Surface) -> Response {
        match self.bindings.action_for_key(&key) {
            Some(Action::Quit) => {
                let combo = KeyCombo::new(key.code, key.modifiers);
                tracing::info!(key = %combo, "quit requested");
                self.wm.quit();
                return Response::Quit;
            }
            Some(Action::Refresh) => {
                self.redraw(surface);
                return Response::Resync;
            }
            None => {}
        }
        let handled = match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.wm.handle_rune(c)
            }
            _ => self.wm.handle_key(key),
        };
        if handled {
            self.redraw(surface);
        }
        Response::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, surface: &mut Surface) -> Response {
        let (x, y) = (mouse.column as i32, mouse.row as i32);
        self.wm.highlight_menu(x, y);
        self.wm.menu().draw(surface);
        self.paint_clock(surface);

        match self.gesture.observe(mouse) {
            Gesture::Press { button, x, y } => {
                if self.wm.click(button, x, y, surface) == ClickOutcome::Quit {
                    return Response::Quit;
                }
            }
            Gesture::Drag { from, to } => {
                self.wm.drag(from.0, from.1, to.0, to.1, surface);
            }
            Gesture::Hover { x, y } | Gesture::Release { x, y } => {
                self.wm.pointer_move(x, y, surface);
            }
            Gesture::Ignored => {}
        }
        // a full redraw above wipes the readout
        self.paint_clock(surface);
        Response::Continue
    }
}

/// Drive `dispatcher` until it asks to quit.
///
/// The surface is sized from the output driver and fully drawn once before
/// the first event. Every pass ends with a `present`; the backend only
/// writes cells that changed.
pub fn run<I, O>(
    dispatcher: &mut Dispatcher,
    input: I,
    output: &mut O,
    clock: Option<&Clock>,
    surface: &mut Surface,
) -> io::Result<()>
where
    I: InputDriver,
    O: OutputDriver,
{
    let (width, height) = output.size()?;
    surface.resize(width, height);
    dispatcher.redraw(surface);
    output.present(surface)?;

    let mut event_loop = EventLoop::new(input, POLL_INTERVAL);
    event_loop.run(|event| {
        let response = match event {
            None => dispatcher.idle(clock.and_then(Clock::latest), surface),
            Some(event) => dispatcher.handle_event(&event, surface),
        };
        match response {
            Response::Quit => {
                tracing::info!("event loop finished");
                return Ok(ControlFlow::Quit);
            }
            Response::Resync => output.sync()?,
            Response::Continue => {}
        }
        output.present(surface)?;
        Ok(ControlFlow::Continue)
    })
}
