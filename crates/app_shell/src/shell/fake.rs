//! Recording fake backend for lifecycle tests
//!
//! Records every backend call in order, injects failures at any acquisition
//! step, and models handle validity so release steps only fire for handles
//! that exist.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{GpuConfig, WindowConfig};
use crate::platform::events::ShellEvent;
use crate::platform::window::WindowError;
use crate::shell::backend::ShellBackend;
use crate::shell::{ShellError, ShellResult};

/// Shared observable state of a [`FakeBackend`]
#[derive(Default)]
pub(crate) struct FakeState {
    /// Every backend call, in invocation order
    pub calls: Vec<String>,
    /// Acquisition step name that should fail
    pub fail_on: Option<&'static str>,
    /// Close flag, as the windowing system would hold it
    pub should_close: bool,
    /// Set the close flag after this many event polls
    pub close_after_polls: Option<u32>,
    /// Number of event polls so far
    pub polls: u32,
    /// Events the next drain will return
    pub pending_events: Vec<ShellEvent>,

    pub windowing_live: bool,
    pub window_live: bool,
    pub surface_live: bool,
    pub device_live: bool,
    pub queues_live: bool,
}

impl FakeState {
    pub fn any_live(&self) -> bool {
        self.windowing_live
            || self.window_live
            || self.surface_live
            || self.device_live
            || self.queues_live
    }
}

/// Backend test double shared with the asserting test via `Rc`
pub(crate) struct FakeBackend {
    state: Rc<RefCell<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> (Self, Rc<RefCell<FakeState>>) {
        let state = Rc::new(RefCell::new(FakeState::default()));
        (
            Self {
                state: Rc::clone(&state),
            },
            state,
        )
    }

    fn acquire(&self, name: &'static str, mark: fn(&mut FakeState)) -> ShellResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(name.to_string());
        if state.fail_on == Some(name) {
            return Err(ShellError::Window(WindowError::Glfw(format!(
                "injected failure in {name}"
            ))));
        }
        mark(&mut state);
        Ok(())
    }

    fn release(&self, name: &'static str, live: fn(&FakeState) -> bool, clear: fn(&mut FakeState)) {
        let mut state = self.state.borrow_mut();
        if live(&state) {
            state.calls.push(name.to_string());
            clear(&mut state);
        }
    }
}

impl ShellBackend for FakeBackend {
    fn init_windowing(&mut self) -> ShellResult<()> {
        self.acquire("init_windowing", |s| s.windowing_live = true)
    }

    fn create_window(&mut self, _config: &WindowConfig) -> ShellResult<()> {
        self.acquire("create_window", |s| s.window_live = true)
    }

    fn create_surface(&mut self, _config: &GpuConfig) -> ShellResult<()> {
        self.acquire("create_surface", |s| s.surface_live = true)
    }

    fn request_device(&mut self) -> ShellResult<()> {
        self.acquire("request_device", |s| s.device_live = true)
    }

    fn acquire_queues(&mut self) -> ShellResult<()> {
        self.acquire("acquire_queues", |s| s.queues_live = true)
    }

    fn poll_events(&mut self) {
        let mut state = self.state.borrow_mut();
        state.calls.push("poll_events".to_string());
        state.polls += 1;
        if let Some(limit) = state.close_after_polls {
            if state.polls >= limit {
                state.should_close = true;
            }
        }
    }

    fn drain_events(&mut self) -> Vec<ShellEvent> {
        let mut state = self.state.borrow_mut();
        state.calls.push("drain_events".to_string());
        std::mem::take(&mut state.pending_events)
    }

    fn should_close(&self) -> bool {
        self.state.borrow().should_close
    }

    fn request_close(&mut self) {
        let mut state = self.state.borrow_mut();
        state.calls.push("request_close".to_string());
        state.should_close = true;
    }

    fn poll_device(&mut self, wait: bool) {
        let mut state = self.state.borrow_mut();
        state.calls.push(if wait {
            "poll_device_wait".to_string()
        } else {
            "poll_device".to_string()
        });
    }

    fn release_queues(&mut self) {
        self.release("release_queues", |s| s.queues_live, |s| s.queues_live = false);
    }

    fn release_device(&mut self) {
        self.release("release_device", |s| s.device_live, |s| s.device_live = false);
    }

    fn release_surface(&mut self) {
        self.release("release_surface", |s| s.surface_live, |s| s.surface_live = false);
    }

    fn destroy_window(&mut self) {
        self.release("destroy_window", |s| s.window_live, |s| s.window_live = false);
    }

    fn terminate_windowing(&mut self) {
        self.release(
            "terminate_windowing",
            |s| s.windowing_live,
            |s| s.windowing_live = false,
        );
    }
}
