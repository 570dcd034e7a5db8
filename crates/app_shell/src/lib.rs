//! # App Shell
//!
//! A small application shell that owns the lifecycle of an OS window bound
//! to a Vulkan surface: window creation, surface/device/queue acquisition,
//! per-frame event pumping, and teardown in reverse acquisition order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use app_shell::prelude::*;
//!
//! fn main() -> Result<(), ShellError> {
//!     app_shell::foundation::logging::init();
//!
//!     let mut shell = Shell::desktop(ShellConfig::default());
//!     shell.on_event(|event, control| {
//!         if let ShellEvent::KeyPressed(KeyCode::Escape) = event {
//!             control.request_close();
//!         }
//!     });
//!
//!     shell.initialize()?;
//!     PlatformDriver::default().drive(shell)
//! }
//! ```
//!
//! The frame loop is a strategy, not a hard-coded `while`: desktop targets
//! use [`driver::CallerDriven`] and own the loop themselves, while
//! host-driven targets (a browser-style environment that ticks the
//! application once per host frame) hand the shell to
//! [`driver::HostDriven`], which registers the frame callback with the
//! host's scheduler and returns.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod driver;
pub mod foundation;
pub mod gpu;
pub mod platform;
pub mod shell;

pub use config::{Config, ConfigError, FrameConfig, GpuConfig, ShellConfig, WindowConfig};
pub use shell::{FrameControl, Shell, ShellError, ShellResult};

/// Common imports for shell users
pub mod prelude {
    pub use crate::{
        config::{Config, ShellConfig},
        driver::{CallerDriven, FrameDriver, HostDriven, HostScheduler},
        foundation::time::FrameClock,
        platform::events::{KeyCode, ShellEvent},
        shell::{FrameControl, Shell, ShellError, ShellResult},
    };
    #[cfg(not(target_family = "wasm"))]
    pub use crate::driver::PlatformDriver;
}
