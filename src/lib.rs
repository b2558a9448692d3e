pub mod app;
pub mod clock;
pub mod components;
pub mod config;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod gesture;
pub mod keybindings;
pub mod menu;
pub mod surface;
pub mod theme;
pub mod tracing_sub;
pub mod window;

pub use error::{Error, Result};
