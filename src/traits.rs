use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;

use crate::Notification;
use crate::Task;

/// The error type returned by data sources.
/// It must be `Send` so that sources can be polled from a spawned tokio task
pub type BoxError = Box<dyn Error + Send + Sync>;

/// A place notifications come from (usually a REST server)
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// Returns every notification of the current user, in the order the source wants them displayed
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, BoxError>;

    /// Mark a single notification as read
    async fn mark_read(&self, id: &str) -> Result<(), BoxError>;

    /// Mark every notification of the current user as read
    async fn mark_all_read(&self) -> Result<(), BoxError>;

    /// Delete a notification
    async fn delete(&self, id: &str) -> Result<(), BoxError>;
}

/// A place tasks come from (usually a REST server)
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Returns the task list of the current user
    /// This function may be slow, or can even fail, e.g. in case of a remote server
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BoxError>;
}

#[async_trait]
impl<T: NotificationSource + ?Sized> NotificationSource for Arc<T> {
    async fn fetch_notifications(&self) -> Result<Vec<Notification>, BoxError> {
        (**self).fetch_notifications().await
    }
    async fn mark_read(&self, id: &str) -> Result<(), BoxError> {
        (**self).mark_read(id).await
    }
    async fn mark_all_read(&self) -> Result<(), BoxError> {
        (**self).mark_all_read().await
    }
    async fn delete(&self, id: &str) -> Result<(), BoxError> {
        (**self).delete(id).await
    }
}

#[async_trait]
impl<T: TaskSource + ?Sized> TaskSource for Arc<T> {
    async fn fetch_tasks(&self) -> Result<Vec<Task>, BoxError> {
        (**self).fetch_tasks().await
    }
}
