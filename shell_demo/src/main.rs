//! Desktop shell demo
//!
//! Opens a window bound to a Vulkan surface and pumps frames until the
//! window is closed (or Escape is pressed).

use std::path::Path;
use std::process;

use app_shell::prelude::*;

const CONFIG_PATH: &str = "shell_demo.toml";

fn load_config() -> ShellConfig {
    if Path::new(CONFIG_PATH).exists() {
        match ShellConfig::load_from_file(CONFIG_PATH) {
            Ok(config) => {
                log::info!("loaded configuration from {CONFIG_PATH}");
                config
            }
            Err(e) => {
                log::error!("failed to load {CONFIG_PATH}: {e}");
                process::exit(1);
            }
        }
    } else {
        log::info!("no {CONFIG_PATH}, using defaults");
        ShellConfig::default()
    }
}

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC occurred: {panic_info:?}");
        if let Some(location) = panic_info.location() {
            eprintln!(
                "Panic location: {}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            );
        }
    }));

    app_shell::foundation::logging::init();

    let config = load_config();
    let mut shell = Shell::desktop(config);

    shell.on_event(|event, control| match event {
        ShellEvent::KeyPressed(KeyCode::Escape) => control.request_close(),
        ShellEvent::FocusChanged(focused) => log::debug!("focus changed: {focused}"),
        _ => {}
    });

    // Window/device creation failures are environment problems, not
    // transient faults: report and exit, no retries.
    if let Err(e) = shell.initialize() {
        log::error!("initialization failed: {e}");
        shell.terminate();
        process::exit(1);
    }

    if let Err(e) = PlatformDriver::default().drive(shell) {
        log::error!("frame loop failed: {e}");
        process::exit(1);
    }

    log::info!("shell demo exited cleanly");
}
