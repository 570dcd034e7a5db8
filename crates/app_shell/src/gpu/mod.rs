//! Vulkan context bindings
//!
//! Instance, adapter selection, logical device, and queue acquisition. The
//! shell acquires these strictly after the window exists and releases them
//! strictly before it is destroyed.

pub mod context;

pub use context::{AdapterInfo, GpuDevice, GpuError, GpuInstance, GpuResult, Queues, SurfaceHandle};
