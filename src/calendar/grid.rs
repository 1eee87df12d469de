//! Month arithmetic, and the layout of a month grid
//!
//! Weeks start on Sunday.

use chrono::{Datelike, Duration, Months, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next_first) => next_first - Duration::days(1),
        None => NaiveDate::MAX,
    }
}

/// Whether both dates are in the same month of the same year
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Shift a date by `months` calendar months (backwards if negative).
///
/// The day of month is kept when it exists in the target month, and clamped to its last day otherwise.
/// Dates outside of what `chrono` can represent are saturated.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(if months >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Saturated at the first representable date
fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday();
    date.checked_sub_signed(Duration::days(i64::from(offset)))
        .unwrap_or(NaiveDate::MIN)
}

/// Saturated at the last representable date
fn end_of_week(date: NaiveDate) -> NaiveDate {
    let offset = 6 - date.weekday().num_days_from_sunday();
    date.checked_add_signed(Duration::days(i64::from(offset)))
        .unwrap_or(NaiveDate::MAX)
}

/// Every day shown in the grid of the month that contains `reference`.
///
/// This starts on the Sunday on or before the first of the month, and ends on the Saturday on or after its last day,
/// so that every row is a full week.
/// At the edges of the representable range, the grid is cut short.
pub fn month_grid(reference: NaiveDate) -> Vec<NaiveDate> {
    let start = start_of_week(first_of_month(reference));
    let end = end_of_week(last_of_month(reference));
    let mut days = Vec::with_capacity(6 * DAYS_PER_WEEK);
    let mut day = start;
    loop {
        days.push(day);
        if day >= end {
            break;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}
