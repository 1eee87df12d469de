//! This module provides ways to tweak mocked sources, so that they can return errors on some tests

use crate::traits::BoxError;

/// This stores some behaviour tweaks, that describe how a mocked instance will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // From the NotificationSource trait
    pub fetch_notifications_behaviour: (u32, u32),
    pub mark_read_behaviour: (u32, u32),
    pub mark_all_read_behaviour: (u32, u32),
    pub delete_behaviour: (u32, u32),

    // From the TaskSource trait
    pub fetch_tasks_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All items will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            fetch_notifications_behaviour: (0, n_fails),
            mark_read_behaviour: (0, n_fails),
            mark_all_read_behaviour: (0, n_fails),
            delete_behaviour: (0, n_fails),
            fetch_tasks_behaviour: (0, n_fails),
        }
    }

    /// Every action fails, forever. This mocks an unreachable server
    pub fn offline() -> Self {
        Self::fail_now(u32::MAX)
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_fetch_notifications(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_notifications_behaviour, "fetch_notifications")
    }
    pub fn can_mark_read(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.mark_read_behaviour, "mark_read")
    }
    pub fn can_mark_all_read(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.mark_all_read_behaviour, "mark_all_read")
    }
    pub fn can_delete(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_behaviour, "delete")
    }
    pub fn can_fetch_tasks(&mut self) -> Result<(), BoxError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.fetch_tasks_behaviour, "fetch_tasks")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), BoxError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value).into())
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}
