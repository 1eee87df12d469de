//! An in-memory source, that mocks the REST server
//!
//! It is used in tests, and can be used for demos when no server is available.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::mock_behaviour::MockBehaviour;
use crate::traits::{BoxError, NotificationSource, TaskSource};
use crate::Notification;
use crate::Task;

/// A source that stores its items in memory
#[derive(Default)]
pub struct MockSource {
    notifications: Mutex<Vec<Notification>>,
    tasks: Mutex<Vec<Task>>,
    behaviour: Mutex<MockBehaviour>,
    fetch_count: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl MockSource {
    pub fn new(notifications: Vec<Notification>, tasks: Vec<Task>) -> Self {
        Self {
            notifications: Mutex::new(notifications),
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    pub fn with_behaviour(self, behaviour: MockBehaviour) -> Self {
        *lock(&self.behaviour) = behaviour;
        self
    }

    /// Change how this source behaves from now on
    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *lock(&self.behaviour) = behaviour;
    }

    /// Replace what the "server" holds
    pub fn set_notifications(&self, notifications: Vec<Notification>) {
        *lock(&self.notifications) = notifications;
    }

    /// What the "server" currently holds
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }

    /// How many times `fetch_notifications` has been called (whether it succeeded or not)
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSource for MockSource {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, BoxError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.behaviour).can_fetch_notifications()?;
        Ok(self.notifications())
    }

    async fn mark_read(&self, id: &str) -> Result<(), BoxError> {
        lock(&self.behaviour).can_mark_read()?;
        let mut notifications = lock(&self.notifications);
        match notifications.iter_mut().find(|n| n.id() == id) {
            None => Err(format!("No notification {}", id).into()),
            Some(n) => {
                n.mark_read();
                Ok(())
            },
        }
    }

    async fn mark_all_read(&self) -> Result<(), BoxError> {
        lock(&self.behaviour).can_mark_all_read()?;
        for n in lock(&self.notifications).iter_mut() {
            n.mark_read();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), BoxError> {
        lock(&self.behaviour).can_delete()?;
        let mut notifications = lock(&self.notifications);
        let len_before = notifications.len();
        notifications.retain(|n| n.id() != id);
        if notifications.len() == len_before {
            return Err(format!("No notification {}", id).into());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskSource for MockSource {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BoxError> {
        lock(&self.behaviour).can_fetch_tasks()?;
        Ok(lock(&self.tasks).clone())
    }
}
