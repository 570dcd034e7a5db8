//! Vulkan instance, adapter, and device management

use ash::extensions::khr::{Surface, Swapchain as SwapchainLoader};
#[cfg(debug_assertions)]
use ash::extensions::ext::DebugUtils;
use ash::vk;
use ash::{Device, Entry, Instance};
use std::ffi::{CStr, CString};
use thiserror::Error;

/// Vulkan-specific error types
#[derive(Error, Debug)]
pub enum GpuError {
    /// General Vulkan API error with result code
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),

    /// Context initialization failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// No physical device is compatible with the surface
    #[error("No suitable GPU found")]
    NoSuitableAdapter,
}

/// Result type for Vulkan operations
pub type GpuResult<T> = Result<T, GpuError>;

/// Vulkan instance wrapper with RAII cleanup
pub struct GpuInstance {
    entry: Entry,
    instance: Instance,
    #[cfg(debug_assertions)]
    debug_utils: Option<DebugUtils>,
    #[cfg(debug_assertions)]
    debug_messenger: Option<vk::DebugUtilsMessengerEXT>,
}

impl GpuInstance {
    /// Create a Vulkan instance with the given windowing-system extensions
    pub fn new(
        app_name: &str,
        enable_validation: bool,
        required_extensions: &[String],
    ) -> GpuResult<Self> {
        let entry = unsafe { Entry::load() }.map_err(|e| {
            GpuError::InitializationFailed(format!("Failed to load Vulkan: {e:?}"))
        })?;

        let app_name_cstr = CString::new(app_name)
            .map_err(|e| GpuError::InitializationFailed(format!("Invalid app name: {e}")))?;
        let engine_name_cstr = CString::new("app_shell")
            .map_err(|e| GpuError::InitializationFailed(format!("Invalid engine name: {e}")))?;
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name_cstr)
            .application_version(vk::make_api_version(0, 1, 0, 0))
            .engine_name(&engine_name_cstr)
            .engine_version(vk::make_api_version(0, 1, 0, 0))
            .api_version(vk::API_VERSION_1_0);

        let cstr_extensions: Vec<CString> = required_extensions
            .iter()
            .map(|ext| {
                CString::new(ext.as_str()).map_err(|e| {
                    GpuError::InitializationFailed(format!("Invalid extension name: {e}"))
                })
            })
            .collect::<GpuResult<_>>()?;

        #[allow(unused_mut)] // Mutable in debug builds for adding debug extensions
        let mut extensions: Vec<*const i8> =
            cstr_extensions.iter().map(|ext| ext.as_ptr()).collect();

        #[cfg(debug_assertions)]
        if enable_validation {
            extensions.push(DebugUtils::name().as_ptr());
        }

        let layer_names = if cfg!(debug_assertions) && enable_validation {
            vec![CString::new("VK_LAYER_KHRONOS_validation").map_err(|e| {
                GpuError::InitializationFailed(format!("Invalid layer name: {e}"))
            })?]
        } else {
            vec![]
        };

        let layer_names_ptrs: Vec<*const i8> =
            layer_names.iter().map(|name| name.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extensions)
            .enabled_layer_names(&layer_names_ptrs);

        let instance = unsafe {
            entry
                .create_instance(&create_info, None)
                .map_err(GpuError::Api)?
        };

        #[cfg(debug_assertions)]
        let (debug_utils, debug_messenger) = if enable_validation {
            let debug_utils = DebugUtils::new(&entry, &instance);
            let debug_messenger = Self::setup_debug_messenger(&debug_utils)?;
            (Some(debug_utils), Some(debug_messenger))
        } else {
            (None, None)
        };

        Ok(Self {
            entry,
            instance,
            #[cfg(debug_assertions)]
            debug_utils,
            #[cfg(debug_assertions)]
            debug_messenger,
        })
    }

    /// The Vulkan entry point
    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// The raw instance
    #[must_use]
    pub fn raw(&self) -> &Instance {
        &self.instance
    }

    #[cfg(debug_assertions)]
    fn setup_debug_messenger(debug_utils: &DebugUtils) -> GpuResult<vk::DebugUtilsMessengerEXT> {
        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(debug_callback));

        unsafe {
            debug_utils
                .create_debug_utils_messenger(&create_info, None)
                .map_err(GpuError::Api)
        }
    }
}

impl Drop for GpuInstance {
    fn drop(&mut self) {
        unsafe {
            #[cfg(debug_assertions)]
            if let (Some(debug_utils), Some(debug_messenger)) =
                (&self.debug_utils, &self.debug_messenger)
            {
                debug_utils.destroy_debug_utils_messenger(*debug_messenger, None);
            }

            self.instance.destroy_instance(None);
        }
    }
}

/// Debug callback for validation layers
#[cfg(debug_assertions)]
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    let callback_data = *callback_data;
    let message = CStr::from_ptr(callback_data.p_message).to_string_lossy();

    if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::error!("[Vulkan] {message_type:?} - {message}");
    } else {
        log::warn!("[Vulkan] {message_type:?} - {message}");
    }

    vk::FALSE
}

/// Graphics surface bound to a window
///
/// Destroyed explicitly via [`SurfaceHandle::destroy`]; the owning instance
/// and the window must both still be live at that point.
pub struct SurfaceHandle {
    raw: vk::SurfaceKHR,
    loader: Surface,
}

impl SurfaceHandle {
    /// Wrap a raw surface with its extension loader
    #[must_use]
    pub fn new(raw: vk::SurfaceKHR, loader: Surface) -> Self {
        Self { raw, loader }
    }

    /// The raw surface handle
    #[must_use]
    pub fn raw(&self) -> vk::SurfaceKHR {
        self.raw
    }

    /// The surface extension loader
    #[must_use]
    pub fn loader(&self) -> &Surface {
        &self.loader
    }

    /// Destroy the surface
    pub fn destroy(self) {
        unsafe {
            self.loader.destroy_surface(self.raw, None);
        }
    }
}

/// Selected physical device and its queue families
pub struct AdapterInfo {
    /// Vulkan physical device handle
    pub device: vk::PhysicalDevice,
    /// Device properties and limits
    pub properties: vk::PhysicalDeviceProperties,
    /// Index of the graphics queue family
    pub graphics_family: u32,
    /// Index of the presentation queue family
    pub present_family: u32,
}

impl AdapterInfo {
    /// Select a physical device compatible with the surface
    pub fn select(
        instance: &Instance,
        surface: vk::SurfaceKHR,
        surface_loader: &Surface,
    ) -> GpuResult<Self> {
        let devices = unsafe {
            instance
                .enumerate_physical_devices()
                .map_err(GpuError::Api)?
        };

        for device in devices {
            if let Ok(adapter) = Self::evaluate_device(instance, device, surface, surface_loader) {
                log::info!("Selected GPU: {}", unsafe {
                    CStr::from_ptr(adapter.properties.device_name.as_ptr()).to_string_lossy()
                });
                return Ok(adapter);
            }
        }

        Err(GpuError::NoSuitableAdapter)
    }

    fn evaluate_device(
        instance: &Instance,
        device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
        surface_loader: &Surface,
    ) -> GpuResult<Self> {
        let properties = unsafe { instance.get_physical_device_properties(device) };
        let queue_families =
            unsafe { instance.get_physical_device_queue_family_properties(device) };

        let mut graphics_family = None;
        let mut present_family = None;

        for (index, family) in queue_families.iter().enumerate() {
            let index = index as u32;

            if family.queue_flags.contains(vk::QueueFlags::GRAPHICS) && graphics_family.is_none() {
                graphics_family = Some(index);
            }

            let present_support = unsafe {
                surface_loader
                    .get_physical_device_surface_support(device, index, surface)
                    .map_err(GpuError::Api)?
            };

            if present_support && present_family.is_none() {
                present_family = Some(index);
            }

            if graphics_family.is_some() && present_family.is_some() {
                break;
            }
        }

        let graphics_family = graphics_family.ok_or_else(|| {
            GpuError::InitializationFailed("No graphics queue family found".to_string())
        })?;

        let present_family = present_family.ok_or_else(|| {
            GpuError::InitializationFailed("No present queue family found".to_string())
        })?;

        // Presentation also needs the swapchain device extension
        let extensions = unsafe {
            instance
                .enumerate_device_extension_properties(device)
                .map_err(GpuError::Api)?
        };

        let has_swapchain = extensions.iter().any(|available| {
            let extension_name = unsafe { CStr::from_ptr(available.extension_name.as_ptr()) };
            extension_name == SwapchainLoader::name()
        });

        if !has_swapchain {
            return Err(GpuError::InitializationFailed(
                "Required device extensions not supported".to_string(),
            ));
        }

        Ok(Self {
            device,
            properties,
            graphics_family,
            present_family,
        })
    }
}

/// Logical device wrapper with RAII cleanup
pub struct GpuDevice {
    device: Device,
    graphics_family: u32,
    present_family: u32,
}

impl GpuDevice {
    /// Create a logical device on the selected adapter
    pub fn new(instance: &Instance, adapter: &AdapterInfo) -> GpuResult<Self> {
        let unique_families: std::collections::HashSet<u32> =
            [adapter.graphics_family, adapter.present_family]
                .iter()
                .copied()
                .collect();

        let queue_infos: Vec<vk::DeviceQueueCreateInfo> = unique_families
            .iter()
            .map(|&family| {
                vk::DeviceQueueCreateInfo::builder()
                    .queue_family_index(family)
                    .queue_priorities(&[1.0])
                    .build()
            })
            .collect();

        let required_extensions = [SwapchainLoader::name().as_ptr()];

        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&required_extensions);

        let device = unsafe {
            instance
                .create_device(adapter.device, &create_info, None)
                .map_err(GpuError::Api)?
        };

        Ok(Self {
            device,
            graphics_family: adapter.graphics_family,
            present_family: adapter.present_family,
        })
    }

    /// Fetch the graphics/present queue pair from the device
    #[must_use]
    pub fn obtain_queues(&self) -> Queues {
        let graphics = unsafe { self.device.get_device_queue(self.graphics_family, 0) };
        let present = unsafe { self.device.get_device_queue(self.present_family, 0) };
        Queues { graphics, present }
    }

    /// Advance the device's internal work queue
    ///
    /// The blocking variant waits for the device to go idle and is used
    /// during teardown. The non-blocking variant is the per-frame tick.
    pub fn poll(&mut self, wait: bool) -> GpuResult<()> {
        if wait {
            unsafe { self.device.device_wait_idle() }.map_err(GpuError::Api)?;
        }
        // TODO: drive per-submission completion fences here once frame
        // submission lands; nothing is in flight yet.
        Ok(())
    }

    /// The raw logical device
    #[must_use]
    pub fn raw(&self) -> &Device {
        &self.device
    }
}

impl Drop for GpuDevice {
    fn drop(&mut self) {
        unsafe {
            // Ensure device is idle before destruction
            let _ = self.device.device_wait_idle();
            self.device.destroy_device(None);
        }
    }
}

/// Graphics and presentation queue pair
#[derive(Clone, Copy)]
pub struct Queues {
    /// Queue for graphics command submission
    pub graphics: vk::Queue,
    /// Queue for surface presentation
    pub present: vk::Queue,
}
