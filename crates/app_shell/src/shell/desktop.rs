//! Desktop backend wiring GLFW and Vulkan into the shell lifecycle

use ash::extensions::khr::Surface;

use crate::config::{GpuConfig, WindowConfig};
use crate::gpu::{AdapterInfo, GpuDevice, GpuInstance, Queues, SurfaceHandle};
use crate::platform::events::ShellEvent;
use crate::platform::window::{Window, WindowSystem};
use crate::shell::backend::ShellBackend;
use crate::shell::{ShellError, ShellResult};

/// Production backend over GLFW and ash
///
/// Every handle lives in an `Option` so each release step can check
/// validity before acting; field order matches reverse acquisition order so
/// an unwound drop stays safe as well.
#[derive(Default)]
pub struct DesktopBackend {
    queues: Option<Queues>,
    device: Option<GpuDevice>,
    adapter: Option<AdapterInfo>,
    surface: Option<SurfaceHandle>,
    instance: Option<GpuInstance>,
    window: Option<Window>,
    window_system: Option<WindowSystem>,
}

impl DesktopBackend {
    /// Create a backend with nothing acquired yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShellBackend for DesktopBackend {
    fn init_windowing(&mut self) -> ShellResult<()> {
        self.window_system = Some(WindowSystem::init()?);
        Ok(())
    }

    fn create_window(&mut self, config: &WindowConfig) -> ShellResult<()> {
        let window_system = self
            .window_system
            .as_mut()
            .ok_or(ShellError::OutOfOrder("window requested before windowing init"))?;
        let window = window_system.create_window(config)?;
        let (fb_width, fb_height) = window.framebuffer_size();
        log::debug!("framebuffer size {fb_width}x{fb_height}");
        self.window = Some(window);
        Ok(())
    }

    fn create_surface(&mut self, config: &GpuConfig) -> ShellResult<()> {
        let window_system = self
            .window_system
            .as_ref()
            .ok_or(ShellError::OutOfOrder("surface requested before windowing init"))?;
        let window = self
            .window
            .as_mut()
            .ok_or(ShellError::OutOfOrder("surface requested before window"))?;

        let required_extensions = window_system.required_instance_extensions()?;
        let instance = GpuInstance::new(
            &config.application_name,
            config.validation_enabled(),
            &required_extensions,
        )?;

        let loader = Surface::new(instance.entry(), instance.raw());
        let raw = window.create_vulkan_surface(instance.raw().handle())?;

        self.surface = Some(SurfaceHandle::new(raw, loader));
        self.instance = Some(instance);
        Ok(())
    }

    fn request_device(&mut self) -> ShellResult<()> {
        let instance = self
            .instance
            .as_ref()
            .ok_or(ShellError::OutOfOrder("device requested before surface"))?;
        let surface = self
            .surface
            .as_ref()
            .ok_or(ShellError::OutOfOrder("device requested before surface"))?;

        let adapter = AdapterInfo::select(instance.raw(), surface.raw(), surface.loader())?;
        let device = GpuDevice::new(instance.raw(), &adapter)?;

        self.adapter = Some(adapter);
        self.device = Some(device);
        Ok(())
    }

    fn acquire_queues(&mut self) -> ShellResult<()> {
        let device = self
            .device
            .as_ref()
            .ok_or(ShellError::OutOfOrder("queues requested before device"))?;
        self.queues = Some(device.obtain_queues());
        Ok(())
    }

    fn poll_events(&mut self) {
        if let Some(window_system) = self.window_system.as_mut() {
            window_system.poll_events();
        }
    }

    fn drain_events(&mut self) -> Vec<ShellEvent> {
        self.window
            .as_ref()
            .map(Window::drain_events)
            .unwrap_or_default()
    }

    fn should_close(&self) -> bool {
        self.window.as_ref().map_or(true, Window::should_close)
    }

    fn request_close(&mut self) {
        if let Some(window) = self.window.as_mut() {
            window.set_should_close(true);
        }
    }

    fn poll_device(&mut self, wait: bool) {
        if let Some(device) = self.device.as_mut() {
            if let Err(e) = device.poll(wait) {
                log::warn!("device poll failed: {e}");
            }
        }
    }

    fn release_queues(&mut self) {
        if self.queues.take().is_some() {
            log::debug!("released queue handles");
        }
    }

    fn release_device(&mut self) {
        // GpuDevice waits for idle and destroys itself on drop
        if self.device.take().is_some() {
            log::info!("released graphics device");
        }
        self.adapter = None;
    }

    fn release_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.destroy();
            log::info!("released surface");
        }
        // The instance backing the surface goes with it
        self.instance = None;
    }

    fn destroy_window(&mut self) {
        if self.window.take().is_some() {
            log::info!("destroyed window");
        }
    }

    fn terminate_windowing(&mut self) {
        if self.window_system.take().is_some() {
            log::info!("terminated window system");
        }
    }
}
