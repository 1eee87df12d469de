//! The notification list, and the values derived from it

use std::collections::HashSet;

use crate::Notification;

/// Where the current notification list comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataOrigin {
    /// Nothing has been fetched yet
    NotLoaded,
    /// The last fetch succeeded
    Remote,
    /// The last fetch failed, the list is the fallback set
    Fallback,
}

/// A consistent snapshot of the notifications.
///
/// `unread_count` is derived from the list and is recomputed on every change, so that both always agree.
#[derive(Clone, Debug, PartialEq)]
pub struct NotificationState {
    notifications: Vec<Notification>,
    unread_count: usize,
    origin: DataOrigin,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            notifications: Vec::new(),
            unread_count: 0,
            origin: DataOrigin::NotLoaded,
        }
    }
}

impl NotificationState {
    pub fn notifications(&self) -> &[Notification] { &self.notifications }
    pub fn unread_count(&self) -> usize { self.unread_count }
    pub fn origin(&self) -> DataOrigin { self.origin }

    pub fn get(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id() == id)
    }

    /// Replace the whole list. Order is kept; duplicate identifiers are dropped
    pub(crate) fn replace(&mut self, notifications: Vec<Notification>, origin: DataOrigin) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(notifications.len());
        for n in notifications {
            if seen.insert(n.id().to_string()) {
                kept.push(n);
            } else {
                log::warn!("Duplicate notification id {}. Ignoring it", n.id());
            }
        }
        self.notifications = kept;
        self.origin = origin;
        self.recount();
    }

    /// Returns whether something changed
    pub(crate) fn mark_read(&mut self, id: &str) -> bool {
        let changed = self.notifications
            .iter_mut()
            .find(|n| n.id() == id)
            .map(|n| n.mark_read())
            .unwrap_or(false);
        self.recount();
        changed
    }

    /// Returns whether something changed
    pub(crate) fn mark_all_read(&mut self) -> bool {
        let mut changed = false;
        for n in self.notifications.iter_mut() {
            changed |= n.mark_read();
        }
        self.recount();
        changed
    }

    /// Returns the removed notification, if any
    pub(crate) fn remove(&mut self, id: &str) -> Option<Notification> {
        let position = self.notifications.iter().position(|n| n.id() == id)?;
        let removed = self.notifications.remove(position);
        self.recount();
        Some(removed)
    }

    fn recount(&mut self) {
        self.unread_count = self.notifications.iter().filter(|n| n.is_read() == false).count();
    }
}
