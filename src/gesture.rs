//! Press / drag / release tracking for the pointer.
//!
//! crossterm reports buttons as `Down`, `Drag` and `Up` kinds rather than a
//! live mask, so [`MouseGesture`] keeps its own [`ButtonMask`] and derives
//! edges from it. Only the transition from "no button" to "some button" is a
//! press; a second button going down mid-gesture just continues the drag.
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: Self = Self(0);

    fn bit(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 0b001,
            MouseButton::Right => 0b010,
            MouseButton::Middle => 0b100,
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, button: MouseButton) -> bool {
        self.0 & Self::bit(button) != 0
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= Self::bit(button);
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !Self::bit(button);
    }
}

/// Edge produced by one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Pointer moved with no button held.
    Hover { x: i32, y: i32 },
    /// First button went down. Dispatch exactly one click at this point.
    Press { button: MouseButton, x: i32, y: i32 },
    /// Button still held. `from` is the position of the previous step, not
    /// the press position, so consecutive drags compose.
    Drag { from: (i32, i32), to: (i32, i32) },
    /// Last button released; hover dispatch resumes.
    Release { x: i32, y: i32 },
    /// Wheel events and other input that does not affect the gesture.
    Ignored,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MouseGesture {
    buttons: ButtonMask,
    pressed: bool,
    anchor: (i32, i32),
    last: (i32, i32),
}

impl MouseGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Where the current gesture started. `None` while idle.
    pub fn anchor(&self) -> Option<(i32, i32)> {
        self.pressed.then_some(self.anchor)
    }

    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    /// Feed a crossterm mouse event.
    pub fn observe(&mut self, event: &MouseEvent) -> Gesture {
        let (x, y) = (event.column as i32, event.row as i32);
        let changed = match event.kind {
            MouseEventKind::Down(button) => {
                self.buttons.insert(button);
                Some(button)
            }
            MouseEventKind::Drag(button) => {
                self.buttons.insert(button);
                Some(button)
            }
            MouseEventKind::Up(button) => {
                self.buttons.remove(button);
                None
            }
            MouseEventKind::Moved => {
                self.buttons = ButtonMask::NONE;
                None
            }
            MouseEventKind::ScrollDown
            | MouseEventKind::ScrollUp
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => return Gesture::Ignored,
        };
        self.step(self.buttons, changed.unwrap_or(MouseButton::Left), x, y)
    }

    /// Advance the state machine with an explicit button mask.
    pub fn step(&mut self, buttons: ButtonMask, button: MouseButton, x: i32, y: i32) -> Gesture {
        self.buttons = buttons;
        if buttons.is_empty() {
            if self.pressed {
                self.pressed = false;
                return Gesture::Release { x, y };
            }
            return Gesture::Hover { x, y };
        }
        if !self.pressed {
            self.pressed = true;
            self.anchor = (x, y);
            self.last = (x, y);
            return Gesture::Press { button, x, y };
        }
        let from = self.last;
        self.last = (x, y);
        Gesture::Drag { from, to: (x, y) }
    }
}
