//! User-facing notifications

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about. Unknown values coming from a server are read as `Info`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NotificationType {
    Info,
    Warning,
    Error,
    Success,
}

impl From<String> for NotificationType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "success" => Self::Success,
            other => {
                log::warn!("Unknown notification type {:?}. Using \"info\" instead", other);
                Self::Info
            },
        }
    }
}

/// How urgent a notification is
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
    /// A value this crate does not know about. It is kept so that it round-trips
    Other(String),
}

impl From<String> for NotificationPriority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => {
                log::warn!("Unknown notification priority {:?}", value);
                Self::Other(value)
            },
        }
    }
}

impl From<NotificationPriority> for String {
    fn from(priority: NotificationPriority) -> String {
        priority.to_string()
    }
}

impl Display for NotificationPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}


/// A notification, as sent by the server
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    id: String,
    title: String,
    message: String,
    #[serde(rename = "type")]
    kind: NotificationType,
    priority: NotificationPriority,
    /// This can only go from `false` to `true`
    read: bool,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team_id: Option<String>,
}

impl Notification {
    pub fn new<S: ToString, T: ToString, U: ToString>(id: S, title: T, message: U,
                  kind: NotificationType, priority: NotificationPriority,
                  read: bool, created_at: DateTime<Utc>) -> Self
    {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            priority,
            read,
            created_at,
            team_id: None,
        }
    }

    /// Attach this notification to a team
    pub fn with_team<S: ToString>(mut self, team_id: S) -> Self {
        self.team_id = Some(team_id.to_string());
        self
    }

    pub fn id(&self) -> &str                      { &self.id         }
    pub fn title(&self) -> &str                   { &self.title      }
    pub fn message(&self) -> &str                 { &self.message    }
    pub fn kind(&self) -> NotificationType        { self.kind        }
    pub fn priority(&self) -> &NotificationPriority { &self.priority }
    pub fn is_read(&self) -> bool                 { self.read        }
    pub fn created_at(&self) -> &DateTime<Utc>    { &self.created_at }
    pub fn team_id(&self) -> Option<&str>         { self.team_id.as_deref() }

    /// Mark this notification as read.
    /// Returns whether it was unread before
    pub fn mark_read(&mut self) -> bool {
        let was_unread = self.read == false;
        self.read = true;
        was_unread
    }

    /// A short, human-readable age, e.g. "5m ago"
    pub fn relative_age(&self, now: DateTime<Utc>) -> String {
        let minutes = (now - self.created_at).num_minutes();
        if minutes < 1 {
            String::from("Just now")
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 24 * 60 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / (24 * 60))
        }
    }
}
