//! Logging setup and re-exports

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// Reads the standard `RUST_LOG` environment variable and falls back to
/// `info` when it is unset.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
