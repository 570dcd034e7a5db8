//! Translation of windowing-system events into shell events

/// Events dispatched by the shell's event pump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// The windowing system requested the window be closed
    CloseRequested,
    /// The window gained or lost input focus
    FocusChanged(bool),
    /// A key was pressed
    KeyPressed(KeyCode),
    /// A key was released
    KeyReleased(KeyCode),
}

/// Key codes the shell dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Escape key
    Escape,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Any key the shell does not name
    Unknown,
}

impl From<glfw::Key> for KeyCode {
    fn from(key: glfw::Key) -> Self {
        match key {
            glfw::Key::Escape => Self::Escape,
            glfw::Key::Space => Self::Space,
            glfw::Key::Enter => Self::Enter,
            _ => Self::Unknown,
        }
    }
}

/// Translate a raw window event into a shell event
///
/// Returns `None` for events the shell does not dispatch (key repeats,
/// cursor movement, and the rest of the windowing system's vocabulary).
#[must_use]
pub fn translate(event: &glfw::WindowEvent) -> Option<ShellEvent> {
    match event {
        glfw::WindowEvent::Close => Some(ShellEvent::CloseRequested),
        glfw::WindowEvent::Focus(focused) => Some(ShellEvent::FocusChanged(*focused)),
        glfw::WindowEvent::Key(key, _, glfw::Action::Press, _) => {
            Some(ShellEvent::KeyPressed(KeyCode::from(*key)))
        }
        glfw::WindowEvent::Key(key, _, glfw::Action::Release, _) => {
            Some(ShellEvent::KeyReleased(KeyCode::from(*key)))
        }
        _ => None,
    }
}
