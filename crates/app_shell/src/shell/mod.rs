//! Shell lifecycle controller
//!
//! [`Shell`] owns the window → surface → device → queues lifecycle: it
//! acquires them in that order during [`Shell::initialize`], pumps events
//! and ticks the device once per [`Shell::run_one_frame`], and releases
//! everything in exact reverse order in [`Shell::terminate`].

pub mod backend;
pub mod desktop;

#[cfg(test)]
pub(crate) mod fake;
mod lifecycle_tests;

use thiserror::Error;

use crate::config::ShellConfig;
use crate::foundation::time::FrameClock;
use crate::gpu::GpuError;
use crate::platform::events::ShellEvent;
use crate::platform::window::WindowError;
use crate::shell::backend::ShellBackend;
use crate::shell::desktop::DesktopBackend;

/// Shell-level errors
#[derive(Error, Debug)]
pub enum ShellError {
    /// Windowing-system failure
    #[error("window system error: {0}")]
    Window(#[from] WindowError),

    /// Graphics-API failure
    #[error("graphics error: {0}")]
    Gpu(#[from] GpuError),

    /// A lifecycle step was requested out of order
    #[error("lifecycle step out of order: {0}")]
    OutOfOrder(&'static str),
}

/// Result type for shell operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Per-dispatch control handle passed to the event handler
///
/// Lets a handler ask the shell to close without holding a reference to it.
#[derive(Debug, Default)]
pub struct FrameControl {
    close: bool,
}

impl FrameControl {
    /// Request that the window be closed after this dispatch
    pub fn request_close(&mut self) {
        self.close = true;
    }
}

/// Handler invoked for every shell event the pump dispatches
pub type EventHandler = Box<dyn FnMut(&ShellEvent, &mut FrameControl)>;

// Frame interval for the debug-level fps line
const FPS_LOG_INTERVAL: u64 = 300;

/// Lifecycle controller owning the window, surface, device, and queues
pub struct Shell {
    backend: Box<dyn ShellBackend>,
    config: ShellConfig,
    clock: FrameClock,
    on_event: Option<EventHandler>,
    initialized: bool,
}

impl Shell {
    /// Create a shell over an explicit backend
    #[must_use]
    pub fn new(config: ShellConfig, backend: Box<dyn ShellBackend>) -> Self {
        Self {
            backend,
            config,
            clock: FrameClock::new(),
            on_event: None,
            initialized: false,
        }
    }

    /// Create a shell over the desktop backend (GLFW + Vulkan)
    #[must_use]
    pub fn desktop(config: ShellConfig) -> Self {
        Self::new(config, Box::new(DesktopBackend::new()))
    }

    /// Register the event handler invoked by the event pump
    pub fn on_event(&mut self, handler: impl FnMut(&ShellEvent, &mut FrameControl) + 'static) {
        self.on_event = Some(Box::new(handler));
    }

    /// Acquire the window, surface, device, and queues, in that order
    ///
    /// Any failing step aborts the remaining steps and propagates the
    /// error. Steps that already completed are not rolled back here;
    /// rollback is [`Shell::terminate`]'s job, which is safe to call after
    /// a partial failure.
    pub fn initialize(&mut self) -> ShellResult<()> {
        log::info!("initializing shell");

        self.backend.init_windowing()?;
        log::info!("window system initialized");

        self.backend.create_window(&self.config.window)?;
        log::info!(
            "window created ({}x{}, \"{}\")",
            self.config.window.width,
            self.config.window.height,
            self.config.window.title
        );

        self.backend.create_surface(&self.config.gpu)?;
        log::info!("surface created");

        self.backend.request_device()?;
        log::info!("device acquired");

        self.backend.acquire_queues()?;
        log::info!("queues acquired");

        self.initialized = true;
        Ok(())
    }

    /// Whether the shell is initialized and the close flag is unset
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.initialized && !self.backend.should_close()
    }

    /// Pump events and tick the device once
    ///
    /// Polls pending window events without blocking, dispatches them to the
    /// registered handler, advances the device's work queue with a
    /// non-blocking poll, and updates the frame clock. A no-op before
    /// initialization.
    pub fn run_one_frame(&mut self) {
        if !self.initialized {
            return;
        }

        self.backend.poll_events();

        let events = self.backend.drain_events();
        if !events.is_empty() {
            let mut control = FrameControl::default();
            if let Some(handler) = self.on_event.as_mut() {
                for event in &events {
                    handler(event, &mut control);
                }
            }
            if control.close {
                self.backend.request_close();
            }
        }

        self.backend.poll_device(false);

        self.clock.update();
        if self.clock.frame_count() % FPS_LOG_INTERVAL == 0 {
            log::debug!("frame {} ({:.1} fps)", self.clock.frame_count(), self.clock.current_fps());
        }
    }

    /// Set the window's close flag programmatically
    pub fn request_close(&mut self) {
        self.backend.request_close();
    }

    /// Release all acquired resources in reverse acquisition order
    ///
    /// Each release step checks handle validity first, so this is safe
    /// after a partial [`Shell::initialize`] failure, safe without any
    /// initialization, and safe to call more than once.
    pub fn terminate(&mut self) {
        if self.initialized {
            log::info!("shutting down shell");
            // Let in-flight device work settle before releasing anything
            self.backend.poll_device(true);
        }

        self.backend.release_queues();
        self.backend.release_device();
        self.backend.release_surface();
        self.backend.destroy_window();
        self.backend.terminate_windowing();

        self.initialized = false;
    }

    /// Frames observed and per-frame timing
    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The configuration this shell was built with
    #[must_use]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.terminate();
    }
}
