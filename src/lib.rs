//! This crate provides the client-side logic of a task-management application.
//!
//! It provides a client for the REST server in the [`client`] module, that can be used as a stand-alone module.
//!
//! On top of any [`NotificationSource`](traits::NotificationSource) (usually this client), a
//! [`NotificationSynchronizer`] keeps a local copy of the user's notifications, polls for new ones, and
//! keeps working when the server cannot be reached. \
//! A [`CalendarView`] lays out a task list as a month grid.

pub mod traits;

pub mod calendar;
pub use calendar::CalendarView;
pub mod notification;
pub use notification::Notification;
pub mod task;
pub use task::Task;
pub mod notifications;
pub use notifications::NotificationSynchronizer;

pub mod client;
pub mod resource;
pub mod clock;
pub mod config;

pub mod mock_behaviour;
pub mod mock_source;
pub mod utils;
