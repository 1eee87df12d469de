//! The notifications shown when the server cannot be reached

use chrono::{DateTime, Duration, Utc};

use crate::notification::{Notification, NotificationPriority, NotificationType};

/// Number of notifications in the fallback set
pub const FALLBACK_LEN: usize = 3;

/// Build the fallback set.
///
/// Its content is fixed; only the timestamps depend on `now` (now, one hour ago, one day ago).
pub fn fallback_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification::new(
            "1",
            "New Team Assignment",
            "You have been added to the Development Team. Welcome!",
            NotificationType::Info,
            NotificationPriority::Medium,
            false,
            now,
        ).with_team("1"),
        Notification::new(
            "2",
            "Project Deadline Reminder",
            "The UI redesign project deadline is approaching. Please ensure all tasks are completed.",
            NotificationType::Warning,
            NotificationPriority::High,
            false,
            now - Duration::hours(1),
        ).with_team("1"),
        Notification::new(
            "3",
            "Team Meeting Scheduled",
            "Weekly team meeting scheduled for tomorrow at 10:00 AM.",
            NotificationType::Info,
            NotificationPriority::Low,
            true,
            now - Duration::days(1),
        ).with_team("1"),
    ]
}
