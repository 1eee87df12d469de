//! Some utility functions

use chrono::{DateTime, Datelike, Utc};

use crate::calendar::style::{Severity, StatusIcon};
use crate::calendar::{CalendarDay, grid::DAYS_PER_WEEK};
use crate::notifications::NotificationState;
use crate::Task;

/// A debug utility that pretty-prints notifications
pub fn print_notifications(state: &NotificationState, now: DateTime<Utc>) {
    println!("NOTIFICATIONS ({} unread, {:?})", state.unread_count(), state.origin());
    if state.notifications().is_empty() {
        println!("    No notifications yet");
    }
    for n in state.notifications() {
        let read = if n.is_read() { " " } else { "*" };
        println!("    {} [{:<6}] {}\t{}\t({})", read, n.priority().to_string(), n.title(), n.relative_age(now), n.id());
    }
}

/// A debug utility that pretty-prints a month grid, one week per line
pub fn print_calendar_grid(days: &[CalendarDay]) {
    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");
    for week in days.chunks(DAYS_PER_WEEK) {
        let line: Vec<String> = week.iter().map(format_cell).collect();
        println!("{}", line.join(""));
    }
}

fn format_cell(day: &CalendarDay) -> String {
    let marker = if day.is_today { '>' } else { ' ' };
    let count = match day.tasks.len() {
        0 => String::from("  "),
        n if day.in_reference_month => format!("{:<2}", n),
        _ => String::from("  "),
    };
    if day.in_reference_month {
        format!("{}{:>2}{}", marker, day.date.day(), count)
    } else {
        format!("{} ..{}", marker, count)
    }
}

/// A debug utility that pretty-prints a list of tasks, as shown in a calendar cell
pub fn print_tasks(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("    No tasks for this date");
    }
    for task in tasks {
        let due = task.due_date()
            .map(|d| d.with_timezone(&chrono::Local).format("%H:%M").to_string())
            .unwrap_or_default();
        println!("    {} {:?}\t{}\t{}", StatusIcon::of(task.status()).glyph(), Severity::of_task(task.priority()), task.title(), due);
    }
}
