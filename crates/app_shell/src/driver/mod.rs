//! Frame scheduling strategies
//!
//! Who owns the frame loop is a per-target decision made once, at build
//! time: desktop targets own an explicit loop ([`CallerDriven`]), while
//! host-driven targets (a browser-style environment) hand the shell to the
//! host's frame scheduler ([`HostDriven`]) and let it invoke the frame
//! callback once per host tick, indefinitely.

use crate::shell::{Shell, ShellResult};

/// A frame scheduling strategy consuming the shell it drives
pub trait FrameDriver {
    /// Drive the shell's frame loop to completion (or hand it to the host)
    fn drive(self, shell: Shell) -> ShellResult<()>;
}

/// Pull mode: the caller owns the loop and fully controls iteration rate
///
/// Runs frames while the shell is running, then terminates it.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallerDriven;

impl FrameDriver for CallerDriven {
    fn drive(self, mut shell: Shell) -> ShellResult<()> {
        log::info!("entering caller-driven frame loop");
        while shell.is_running() {
            shell.run_one_frame();
        }
        log::info!("exiting after {} frames", shell.clock().frame_count());
        shell.terminate();
        Ok(())
    }
}

/// Host frame scheduler interface (push mode)
///
/// The host invokes the registered callback once per host-determined frame
/// tick. With `simulate_infinite_loop` the registration call is the logical
/// end of the caller's control flow: frames keep running under the host
/// after it returns.
pub trait HostScheduler {
    /// Register the per-frame callback with the host
    ///
    /// `fps_hint` of 0 lets the host pick its native rate. There is no
    /// unregistration short of process exit.
    fn register_frame_callback(
        &mut self,
        callback: Box<dyn FnMut()>,
        fps_hint: u32,
        simulate_infinite_loop: bool,
    );
}

/// Push mode: the host owns the loop and ticks the shell
///
/// The shell is moved into the registered closure, so it lives exactly as
/// long as the host's registration; nothing is torn down when
/// [`FrameDriver::drive`] returns control to the caller. The callback never
/// sleeps or yields on its own: the host is the cooperative scheduler.
pub struct HostDriven<'a, S: HostScheduler> {
    scheduler: &'a mut S,
    fps_hint: u32,
}

impl<'a, S: HostScheduler> HostDriven<'a, S> {
    /// Create a push-mode driver over the host's scheduler
    pub fn new(scheduler: &'a mut S, fps_hint: u32) -> Self {
        Self {
            scheduler,
            fps_hint,
        }
    }
}

impl<S: HostScheduler> FrameDriver for HostDriven<'_, S> {
    fn drive(self, shell: Shell) -> ShellResult<()> {
        log::info!("registering frame callback with host scheduler");
        let mut shell = shell;
        self.scheduler.register_frame_callback(
            Box::new(move || shell.run_one_frame()),
            self.fps_hint,
            true,
        );
        Ok(())
    }
}

/// The frame driver matching this target's loop-ownership model
///
/// Host-driven targets construct [`HostDriven`] with their scheduler
/// instead.
#[cfg(not(target_family = "wasm"))]
pub type PlatformDriver = CallerDriven;
