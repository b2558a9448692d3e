//! Concrete window types.
//!
//! Variants are built by composition: a decorated window wraps a simple one
//! and draws chrome on top, and the content windows wrap a decorated one.
pub mod block_game;
pub mod decorated;
pub mod directory;
pub mod simple;
pub mod text;

pub use block_game::BlockGameWindow;
pub use decorated::DecoratedWindow;
pub use directory::{DirectoryWindow, SortKey};
pub use simple::SimpleWindow;
pub use text::{TextLog, TextWindow};
