//! Window management using GLFW
//!
//! Library initialization and window creation are separate steps here
//! because they are separate stages of the shell lifecycle: the library can
//! be live with no window, and each has its own teardown.

use thiserror::Error;

use crate::config::WindowConfig;
use crate::platform::events::{self, ShellEvent};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("GLFW initialization failed")]
    InitializationFailed,

    #[error("Window creation failed")]
    CreationFailed,

    #[error("GLFW error: {0}")]
    Glfw(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Handle to the initialized windowing library
///
/// Dropping this terminates the library, so it must outlive every [`Window`]
/// created from it.
pub struct WindowSystem {
    glfw: glfw::Glfw,
}

impl WindowSystem {
    /// Initialize the windowing library
    pub fn init() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::InitializationFailed)?;
        Ok(Self { glfw })
    }

    /// Create a window configured for Vulkan rendering (no client API context)
    pub fn create_window(&mut self, config: &WindowConfig) -> WindowResult<Window> {
        self.glfw
            .window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        self.glfw
            .window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (mut window, events) = self
            .glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_focus_polling(true);

        Ok(Window { window, events })
    }

    /// Process all pending events from the windowing system (non-blocking)
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Instance extensions the windowing system needs for surface creation
    pub fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw.get_required_instance_extensions().ok_or_else(|| {
            WindowError::Glfw("window system reports no Vulkan-capable driver".to_string())
        })
    }
}

/// GLFW window wrapper with its event receiver
pub struct Window {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Whether the close flag has been set, by the user or programmatically
    #[must_use]
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Set or clear the window's close flag
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Framebuffer size in pixels
    #[must_use]
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width as u32, height as u32)
    }

    /// Drain queued window events, translated to shell events
    ///
    /// Events with no shell-level meaning are dropped.
    pub fn drain_events(&self) -> Vec<ShellEvent> {
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| {
                let translated = events::translate(&event);
                if translated.is_none() {
                    log::trace!("dropping window event {event:?}");
                }
                translated
            })
            .collect()
    }

    /// Create a Vulkan surface for this window
    pub fn create_vulkan_surface(
        &mut self,
        instance: ash::vk::Instance,
    ) -> WindowResult<ash::vk::SurfaceKHR> {
        let mut surface = ash::vk::SurfaceKHR::null();
        let result = self
            .window
            .create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == ash::vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(WindowError::Glfw(format!(
                "Failed to create Vulkan surface: {result:?}"
            )))
        }
    }
}
