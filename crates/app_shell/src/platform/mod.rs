//! Platform bindings for the windowing system

pub mod events;
pub mod window;

pub use events::{KeyCode, ShellEvent};
pub use window::{Window, WindowError, WindowResult, WindowSystem};
