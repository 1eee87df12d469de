//! How priorities and statuses are displayed
//!
//! Every function here is total: unknown values map to a default tier, icon or colour.

use csscolorparser::Color;

use crate::notification::{NotificationPriority, NotificationType};
use crate::task::{TaskPriority, TaskStatus};

/// Visual severity tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    High,
    Medium,
    Low,
    Neutral,
}

impl Severity {
    pub fn of_task(priority: &TaskPriority) -> Self {
        match priority {
            TaskPriority::High => Self::High,
            TaskPriority::Medium => Self::Medium,
            TaskPriority::Low => Self::Low,
            TaskPriority::Other(_) => Self::Neutral,
        }
    }

    pub fn of_notification(priority: &NotificationPriority) -> Self {
        match priority {
            NotificationPriority::High => Self::High,
            NotificationPriority::Medium => Self::Medium,
            NotificationPriority::Low => Self::Low,
            NotificationPriority::Other(_) => Self::Neutral,
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Self::High => "#ef4444",
            Self::Medium => "#eab308",
            Self::Low => "#22c55e",
            Self::Neutral => "#6b7280",
        }
    }

    pub fn color(&self) -> Color {
        parse_color(self.hex())
    }
}

/// Icon of a task, depending on its status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    Done,
    Alert,
    Clock,
}

impl StatusIcon {
    pub fn of(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Completed => Self::Done,
            TaskStatus::Overdue => Self::Alert,
            TaskStatus::Pending => Self::Clock,
        }
    }

    /// A one-character rendering, for terminals
    pub fn glyph(&self) -> char {
        match self {
            Self::Done => '✓',
            Self::Alert => '!',
            Self::Clock => '·',
        }
    }
}

/// Icon of a notification, depending on its type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationIcon {
    Info,
    Alert,
    Check,
}

impl NotificationIcon {
    /// The icon, and its colour
    pub fn of(kind: NotificationType) -> (Self, Color) {
        match kind {
            NotificationType::Warning => (Self::Alert, parse_color("#eab308")),
            NotificationType::Error => (Self::Alert, parse_color("#ef4444")),
            NotificationType::Success => (Self::Check, parse_color("#22c55e")),
            NotificationType::Info => (Self::Info, parse_color("#3b82f6")),
        }
    }
}

fn parse_color(hex: &str) -> Color {
    csscolorparser::parse(hex).unwrap_or_else(|err| {
        log::warn!("Invalid colour {:?} ({}). Using grey", hex, err);
        Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_priorities() {
        assert_eq!(Severity::of_task(&TaskPriority::High), Severity::High);
        assert_eq!(Severity::of_task(&TaskPriority::Medium), Severity::Medium);
        assert_eq!(Severity::of_task(&TaskPriority::Low), Severity::Low);
        assert_eq!(Severity::of_task(&TaskPriority::Other("high".to_string())), Severity::Neutral);
        assert_eq!(Severity::of_task(&TaskPriority::Other(String::new())), Severity::Neutral);
    }

    #[test]
    fn notification_priorities() {
        assert_eq!(Severity::of_notification(&NotificationPriority::High), Severity::High);
        assert_eq!(Severity::of_notification(&NotificationPriority::Other("?".into())), Severity::Neutral);
    }

    #[test]
    fn statuses() {
        assert_eq!(StatusIcon::of(TaskStatus::Completed), StatusIcon::Done);
        assert_eq!(StatusIcon::of(TaskStatus::Overdue), StatusIcon::Alert);
        assert_eq!(StatusIcon::of(TaskStatus::Pending), StatusIcon::Clock);
        // Unknown statuses are read as pending
        assert_eq!(StatusIcon::of(TaskStatus::from("archived".to_string())), StatusIcon::Clock);
    }

    #[test]
    fn colours() {
        for tier in [Severity::High, Severity::Medium, Severity::Low, Severity::Neutral] {
            assert_eq!(tier.color().to_hex_string(), tier.hex());
        }
        assert_eq!(NotificationIcon::of(NotificationType::Error).0, NotificationIcon::Alert);
        assert_eq!(NotificationIcon::of(NotificationType::Success).0, NotificationIcon::Check);
        assert_eq!(NotificationIcon::of(NotificationType::Info).1.to_hex_string(), "#3b82f6");
    }
}
