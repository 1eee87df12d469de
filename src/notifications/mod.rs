//! This module keeps a local copy of the user's notifications in sync with a [`NotificationSource`]
//!
//! A [`NotificationSynchronizer`] owns the notification list and its unread count.
//! Once mounted, it polls its source periodically, until it is disposed (or dropped).
//!
//! Every failure of the source is tolerated: reads fall back to a fixed set of notifications,
//! writes are applied locally anyway. The next successful fetch overwrites the local state,
//! which means a write that failed on the server will re-appear reverted after that fetch.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::clock::{Clock, SystemClock};
use crate::config::{DEFAULT_POLL_INTERVAL, MIN_POLL_INTERVAL};
use crate::traits::NotificationSource;

pub mod fallback;
pub mod outcome;
pub mod state;

use fallback::fallback_notifications;
pub use outcome::{LocalOutcome, RemoteOutcome, SyncOutcome};
pub use state::{DataOrigin, NotificationState};

/// See [`NotificationSynchronizer::subscribe`]
pub type StateReceiver = watch::Receiver<NotificationState>;


struct Shared {
    state: NotificationState,
    detached: bool,
}

/// What the polling task and the synchronizer share
struct Inner<S> {
    source: S,
    clock: Arc<dyn Clock>,
    /// Never held across an `.await`
    shared: Mutex<Shared>,
    publisher: watch::Sender<NotificationState>,
}

impl<S: NotificationSource> Inner<S> {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        match self.shared.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Apply a change to the state, and publish the new state if it changed.
    /// `mutation` returns whether it changed something
    fn commit<F>(&self, mutation: F) -> LocalOutcome
    where
        F: FnOnce(&mut NotificationState) -> bool,
    {
        let mut shared = self.lock();
        if shared.detached {
            log::debug!("Synchronizer is detached, ignoring a state change");
            return LocalOutcome::Detached;
        }
        if mutation(&mut shared.state) == false {
            return LocalOutcome::Unchanged;
        }
        self.publisher.send_replace(shared.state.clone());
        LocalOutcome::Applied
    }

    async fn fetch_all(&self) -> SyncOutcome {
        match self.source.fetch_notifications().await {
            Ok(notifications) => {
                let local = self.commit(|state| {
                    state.replace(notifications, DataOrigin::Remote);
                    true
                });
                if local == LocalOutcome::Applied {
                    let shared = self.lock();
                    log::info!("Fetched {} notifications ({} unread)", shared.state.notifications().len(), shared.state.unread_count());
                }
                SyncOutcome::new(RemoteOutcome::Confirmed, local)
            },
            Err(err) => {
                log::warn!("Unable to fetch notifications ({}). Using the fallback notifications", err);
                let fallback = fallback_notifications(self.clock.now());
                let local = self.commit(|state| {
                    state.replace(fallback, DataOrigin::Fallback);
                    true
                });
                SyncOutcome::new(RemoteOutcome::Failed(err.to_string()), local)
            },
        }
    }

    async fn mark_read(&self, id: &str) -> SyncOutcome {
        let local = self.commit(|state| state.mark_read(id));
        let remote = RemoteOutcome::from_result("mark notification as read", self.source.mark_read(id).await);
        SyncOutcome::new(remote, local)
    }

    async fn mark_all_read(&self) -> SyncOutcome {
        let local = self.commit(|state| state.mark_all_read());
        let remote = RemoteOutcome::from_result("mark all notifications as read", self.source.mark_all_read().await);
        SyncOutcome::new(remote, local)
    }

    async fn delete(&self, id: &str) -> SyncOutcome {
        let local = self.commit(|state| state.remove(id).is_some());
        let remote = RemoteOutcome::from_result("delete notification", self.source.delete(id).await);
        SyncOutcome::new(remote, local)
    }

    fn detach(&self) {
        self.lock().detached = true;
    }
}


/// Owns the notification list of the current user, and keeps it in sync with a source.
///
/// Every local change is applied immediately (before the server answers), whatever the server says.
/// The list and its unread count are always updated together: [`state`](Self::state) and
/// [`subscribe`](Self::subscribe) never expose one without the other.
pub struct NotificationSynchronizer<S>
where
    S: NotificationSource + 'static,
{
    inner: Arc<Inner<S>>,
    poll_interval: Duration,
    poller: Option<JoinHandle<()>>,
}

impl<S> NotificationSynchronizer<S>
where
    S: NotificationSource + 'static,
{
    /// Create a synchronizer that uses the system clock and the default poll interval
    pub fn new(source: S) -> Self {
        Self::create(source, Arc::new(SystemClock), DEFAULT_POLL_INTERVAL)
    }

    /// Create a synchronizer. This does not fetch anything yet, see [`Self::mount`]
    ///
    /// Poll intervals shorter than [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn create(source: S, clock: Arc<dyn Clock>, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval < MIN_POLL_INTERVAL {
            log::warn!("Poll interval {:?} is too short, using {:?} instead", poll_interval, MIN_POLL_INTERVAL);
            MIN_POLL_INTERVAL
        } else {
            poll_interval
        };
        let (publisher, _) = watch::channel(NotificationState::default());
        let inner = Inner {
            source,
            clock,
            shared: Mutex::new(Shared { state: NotificationState::default(), detached: false }),
            publisher,
        };
        Self {
            inner: Arc::new(inner),
            poll_interval,
            poller: None,
        }
    }

    /// The source this synchronizer talks to
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// How often the source is polled once mounted
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// A snapshot of the current state
    pub fn state(&self) -> NotificationState {
        self.inner.lock().state.clone()
    }

    /// Get notified of every state change
    pub fn subscribe(&self) -> StateReceiver {
        self.inner.publisher.subscribe()
    }

    /// Whether the polling task is running
    pub fn is_mounted(&self) -> bool {
        self.poller.is_some()
    }

    /// Whether [`Self::dispose`] has been called
    pub fn is_disposed(&self) -> bool {
        self.inner.lock().detached
    }

    /// Fetch the notifications now, then start polling every `poll_interval`.
    ///
    /// This must be called from within a tokio runtime. Mounting twice does not start a second timer.
    pub async fn mount(&mut self) -> SyncOutcome {
        let outcome = self.inner.fetch_all().await;
        if self.poller.is_some() || outcome.local == LocalOutcome::Detached {
            return outcome;
        }

        let inner = Arc::clone(&self.inner);
        let period = self.poll_interval;
        log::debug!("Polling notifications every {:?}", period);
        self.poller = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if inner.fetch_all().await.local == LocalOutcome::Detached {
                    break;
                }
            }
        }));
        outcome
    }

    /// Stop polling. The state is frozen from now on: requests that complete later are not applied.
    ///
    /// Calling this more than once is harmless. This is also done when the synchronizer is dropped.
    pub fn dispose(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.abort();
            log::debug!("Stopped polling notifications");
        }
        self.inner.detach();
    }

    /// Replace the list with what the source currently has (or with the fallback set if this fails)
    pub async fn fetch_all(&self) -> SyncOutcome {
        self.inner.fetch_all().await
    }

    /// Mark a notification as read
    pub async fn mark_read(&self, id: &str) -> SyncOutcome {
        self.inner.mark_read(id).await
    }

    /// Mark every notification as read
    pub async fn mark_all_read(&self) -> SyncOutcome {
        self.inner.mark_all_read().await
    }

    /// Remove a notification
    pub async fn delete(&self, id: &str) -> SyncOutcome {
        self.inner.delete(id).await
    }
}

impl<S> Drop for NotificationSynchronizer<S>
where
    S: NotificationSource + 'static,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
