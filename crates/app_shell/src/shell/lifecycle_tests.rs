//! Behavioral tests for the shell lifecycle
//!
//! These run against the recording fake backend, so ordering and teardown
//! properties are checked without a display or a GPU.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::config::ShellConfig;
    use crate::platform::events::{KeyCode, ShellEvent};
    use crate::shell::fake::FakeBackend;
    use crate::shell::Shell;

    const ACQUIRE_ORDER: [&str; 5] = [
        "init_windowing",
        "create_window",
        "create_surface",
        "request_device",
        "acquire_queues",
    ];

    const RELEASE_ORDER: [&str; 5] = [
        "release_queues",
        "release_device",
        "release_surface",
        "destroy_window",
        "terminate_windowing",
    ];

    fn shell_with_fake() -> (Shell, Rc<RefCell<crate::shell::fake::FakeState>>) {
        let (backend, state) = FakeBackend::new();
        (Shell::new(ShellConfig::default(), Box::new(backend)), state)
    }

    /// Resources are acquired in exactly windowing → window → surface →
    /// device → queues order.
    #[test]
    fn initialize_acquires_in_order() {
        let (mut shell, state) = shell_with_fake();
        shell.initialize().unwrap();
        assert_eq!(state.borrow().calls, ACQUIRE_ORDER);
    }

    /// A failure at step k aborts the remaining steps, and a subsequent
    /// terminate releases exactly the resources of steps 1..k-1, in
    /// reverse order.
    #[test]
    fn failure_at_each_step_releases_exactly_prior_steps() {
        for (k, failing_step) in ACQUIRE_ORDER.iter().enumerate() {
            let (mut shell, state) = shell_with_fake();
            state.borrow_mut().fail_on = Some(failing_step);

            assert!(shell.initialize().is_err(), "step {failing_step} should fail");
            // The failing step was attempted, nothing after it was
            let attempted: Vec<_> = state.borrow().calls.clone();
            assert_eq!(attempted, ACQUIRE_ORDER[..=k].to_vec());
            assert!(!shell.is_running());

            state.borrow_mut().calls.clear();
            shell.terminate();

            let expected: Vec<_> = RELEASE_ORDER[RELEASE_ORDER.len() - k..].to_vec();
            assert_eq!(
                state.borrow().calls,
                expected,
                "teardown after failing {failing_step}"
            );
            assert!(!state.borrow().any_live());
        }
    }

    /// is_running is false before initialization, true right after it, and
    /// false once the close flag is observed.
    #[test]
    fn is_running_tracks_initialization_and_close_flag() {
        let (mut shell, state) = shell_with_fake();
        assert!(!shell.is_running());

        shell.initialize().unwrap();
        assert!(shell.is_running());

        state.borrow_mut().close_after_polls = Some(1);
        shell.run_one_frame();
        assert!(!shell.is_running());
    }

    /// With no pending events, a frame only polls: events, drain, device
    /// tick, nothing else.
    #[test]
    fn frame_without_events_only_polls() {
        let (mut shell, state) = shell_with_fake();
        shell.initialize().unwrap();
        state.borrow_mut().calls.clear();

        shell.run_one_frame();
        assert_eq!(
            state.borrow().calls,
            ["poll_events", "drain_events", "poll_device"]
        );
    }

    /// Before initialization a frame is a complete no-op.
    #[test]
    fn frame_before_initialize_is_noop() {
        let (mut shell, state) = shell_with_fake();
        shell.run_one_frame();
        assert!(state.borrow().calls.is_empty());
    }

    /// Queued events reach the registered handler in order.
    #[test]
    fn events_reach_handler() {
        let (mut shell, state) = shell_with_fake();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        shell.on_event(move |event, _control| sink.borrow_mut().push(*event));

        shell.initialize().unwrap();
        state.borrow_mut().pending_events = vec![
            ShellEvent::FocusChanged(true),
            ShellEvent::KeyPressed(KeyCode::Space),
        ];
        shell.run_one_frame();

        assert_eq!(
            *seen.borrow(),
            vec![
                ShellEvent::FocusChanged(true),
                ShellEvent::KeyPressed(KeyCode::Space),
            ]
        );
    }

    /// A handler can request close through the frame control; the shell
    /// forwards it to the window's close flag.
    #[test]
    fn handler_close_request_sets_close_flag() {
        let (mut shell, state) = shell_with_fake();
        shell.on_event(|event, control| {
            if matches!(event, ShellEvent::KeyPressed(KeyCode::Escape)) {
                control.request_close();
            }
        });

        shell.initialize().unwrap();
        state.borrow_mut().pending_events = vec![ShellEvent::KeyPressed(KeyCode::Escape)];
        shell.run_one_frame();

        assert!(!shell.is_running());
        assert!(state.borrow().calls.contains(&"request_close".to_string()));
    }

    /// A programmatic close request sets the close flag directly.
    #[test]
    fn request_close_stops_the_shell() {
        let (mut shell, _state) = shell_with_fake();
        shell.initialize().unwrap();
        shell.request_close();
        assert!(!shell.is_running());
    }

    /// Full teardown settles device work, then releases in exactly the
    /// reverse of acquisition order.
    #[test]
    fn terminate_releases_in_reverse_order() {
        let (mut shell, state) = shell_with_fake();
        shell.initialize().unwrap();
        state.borrow_mut().calls.clear();

        shell.terminate();

        let mut expected = vec!["poll_device_wait"];
        expected.extend(RELEASE_ORDER);
        assert_eq!(state.borrow().calls, expected);
        assert!(!state.borrow().any_live());
    }

    /// A second terminate finds no live handles and releases nothing.
    #[test]
    fn terminate_twice_is_safe() {
        let (mut shell, state) = shell_with_fake();
        shell.initialize().unwrap();
        shell.terminate();
        state.borrow_mut().calls.clear();

        shell.terminate();
        assert!(state.borrow().calls.is_empty());
    }

    /// Terminate without initialize is a safe no-op.
    #[test]
    fn terminate_without_initialize_is_noop() {
        let (mut shell, state) = shell_with_fake();
        shell.terminate();
        assert!(state.borrow().calls.is_empty());
    }

    /// Dropping the shell funnels into the same teardown path.
    #[test]
    fn drop_terminates() {
        let (mut shell, state) = shell_with_fake();
        shell.initialize().unwrap();
        drop(shell);
        assert!(!state.borrow().any_live());
        assert!(state
            .borrow()
            .calls
            .contains(&"terminate_windowing".to_string()));
    }
}
