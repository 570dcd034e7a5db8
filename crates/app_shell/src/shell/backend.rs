//! Backend abstraction for the shell lifecycle
//!
//! This trait is the seam between the lifecycle controller and the concrete
//! windowing/graphics libraries. One method per acquisition step, one per
//! release step, plus the per-frame polling queries. The controller calls
//! acquisition methods strictly in lifecycle order and release methods in
//! the exact reverse; implementations may rely on that ordering.

use crate::config::{GpuConfig, WindowConfig};
use crate::platform::events::ShellEvent;
use crate::shell::ShellResult;

/// Platform backend driven by the [`Shell`](crate::shell::Shell)
///
/// Release methods must check handle validity before releasing so that
/// teardown after a partial initialization only touches what exists.
pub trait ShellBackend {
    /// Initialize the windowing library
    fn init_windowing(&mut self) -> ShellResult<()>;

    /// Create the window
    fn create_window(&mut self, config: &WindowConfig) -> ShellResult<()>;

    /// Create the graphics surface (and the API instance backing it)
    fn create_surface(&mut self, config: &GpuConfig) -> ShellResult<()>;

    /// Select a surface-compatible adapter and create the logical device
    fn request_device(&mut self) -> ShellResult<()>;

    /// Obtain the command queue pair from the device
    fn acquire_queues(&mut self) -> ShellResult<()>;

    /// Process all pending events from the windowing system (non-blocking)
    fn poll_events(&mut self);

    /// Drain queued window events, translated to shell events
    fn drain_events(&mut self) -> Vec<ShellEvent>;

    /// Whether the window's close flag has been set
    fn should_close(&self) -> bool;

    /// Set the window's close flag
    fn request_close(&mut self);

    /// Advance the device's internal work queue; `wait` blocks until idle
    fn poll_device(&mut self, wait: bool);

    /// Release the queue pair
    fn release_queues(&mut self);

    /// Release the logical device and adapter
    fn release_device(&mut self);

    /// Release the surface (and the API instance backing it)
    fn release_surface(&mut self);

    /// Destroy the window
    fn destroy_window(&mut self);

    /// Terminate the windowing library
    fn terminate_windowing(&mut self);
}
