//! To-do tasks, as listed by the server
//!
//! Tasks are owned by the server: this crate only reads them.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Task priority. The server uses capitalized names
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
    Other(String),
}

impl From<String> for TaskPriority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Other(value),
        }
    }
}

impl From<TaskPriority> for String {
    fn from(priority: TaskPriority) -> String {
        priority.to_string()
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Task status. Unknown values are read as `Pending`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TaskStatus {
    Pending,
    Completed,
    Overdue,
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            "overdue" => Self::Overdue,
            other => {
                log::warn!("Unknown task status {:?}. Considering it is pending", other);
                Self::Pending
            },
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "id_from_string_or_number")]
    id: String,
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    description: String,
    /// When this task is due. Tasks without a (valid) due date never show up in a calendar
    #[serde(default, deserialize_with = "lenient_due_date")]
    due_date: Option<DateTime<Utc>>,
    #[serde(default = "default_priority")]
    priority: TaskPriority,
    #[serde(default)]
    status: TaskStatus,
}

impl Task {
    pub fn new<S: ToString, T: ToString>(id: S, title: T, due_date: Option<DateTime<Utc>>,
                                         priority: TaskPriority, status: TaskStatus) -> Self
    {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            due_date,
            priority,
            status,
        }
    }

    pub fn with_description<S: ToString>(mut self, description: S) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn id(&self) -> &str                        { &self.id          }
    pub fn title(&self) -> &str                     { &self.title       }
    pub fn description(&self) -> &str               { &self.description }
    pub fn due_date(&self) -> Option<&DateTime<Utc>> { self.due_date.as_ref() }
    pub fn priority(&self) -> &TaskPriority         { &self.priority    }
    pub fn status(&self) -> TaskStatus              { self.status       }

    /// The calendar day (in local time) this task is due
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|d| d.with_timezone(&Local).date_naive())
    }
}

fn default_priority() -> TaskPriority {
    TaskPriority::Medium
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid task id {}", other))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_due_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let parsed = parse_due_date(&s);
        if parsed.is_none() {
            log::warn!("Ignoring invalid due date {:?}", s);
        }
        parsed
    }))
}

/// Parse a due date the way the server may send it.
///
/// Timestamps without an offset, and bare dates, are in local time
pub fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0)))?;

    Local.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
