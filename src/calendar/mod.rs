//! Month view of a task list
//!
//! A [`CalendarView`] buckets tasks by the (local) day they are due, and lays out a month grid.
//! Tasks are owned elsewhere: the view only reads them, and is given a new list whenever it changes.

pub mod grid;
pub mod style;

use bitflags::bitflags;
use chrono::NaiveDate;

use crate::clock::Clock;
use crate::task::{Task, TaskStatus};
use crate::traits::{BoxError, TaskSource};

/// How many tasks a grid cell displays. The others are summed up in an overflow counter
pub const MAX_TASKS_PER_CELL: usize = 3;

bitflags! {
    /// Which task statuses are shown
    pub struct StatusFilter: u8 {
        const PENDING = 1;
        const COMPLETED = 2;
        const OVERDUE = 4;
        const ALL = Self::PENDING.bits | Self::COMPLETED.bits | Self::OVERDUE.bits;
    }
}

impl StatusFilter {
    pub fn accepts(&self, status: TaskStatus) -> bool {
        let flag = match status {
            TaskStatus::Pending => Self::PENDING,
            TaskStatus::Completed => Self::COMPLETED,
            TaskStatus::Overdue => Self::OVERDUE,
        };
        self.contains(flag)
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::ALL
    }
}


/// A cell of the month grid
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Whether this day belongs to the displayed month (rather than to a neighbouring one)
    pub in_reference_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Every task due this day, in source order
    pub tasks: Vec<Task>,
}

impl CalendarDay {
    /// The tasks that fit in the cell
    pub fn displayed(&self) -> &[Task] {
        let end = self.tasks.len().min(MAX_TASKS_PER_CELL);
        &self.tasks[..end]
    }

    /// How many tasks do not fit in the cell, if any
    pub fn overflow(&self) -> Option<usize> {
        match self.tasks.len() {
            n if n > MAX_TASKS_PER_CELL => Some(n - MAX_TASKS_PER_CELL),
            _ => None,
        }
    }
}


/// The state of a month view
#[derive(Clone, Debug)]
pub struct CalendarView {
    tasks: Vec<Task>,
    /// Any day of the displayed month
    reference: NaiveDate,
    selected: NaiveDate,
    filter: StatusFilter,
}

impl CalendarView {
    /// Create a view that displays the current month, with today selected
    pub fn new(tasks: Vec<Task>, clock: &dyn Clock) -> Self {
        let today = clock.today();
        Self::at(tasks, today)
    }

    /// Create a view that displays the month of `reference`, with `reference` selected
    pub fn at(tasks: Vec<Task>, reference: NaiveDate) -> Self {
        Self {
            tasks,
            reference,
            selected: reference,
            filter: StatusFilter::default(),
        }
    }

    pub fn tasks(&self) -> &[Task]            { &self.tasks    }
    pub fn reference(&self) -> NaiveDate      { self.reference }
    pub fn selected(&self) -> NaiveDate       { self.selected  }
    pub fn filter(&self) -> StatusFilter      { self.filter    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    /// Replace the task list with the one of `source`.
    ///
    /// In case of an error, the current list is kept
    pub async fn refresh<T: TaskSource + ?Sized>(&mut self, source: &T) -> Result<usize, BoxError> {
        match source.fetch_tasks().await {
            Ok(tasks) => {
                log::info!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
                Ok(self.tasks.len())
            },
            Err(err) => {
                log::error!("Failed to load tasks: {}", err);
                Err(err)
            },
        }
    }

    fn visible(&self) -> impl Iterator<Item = &Task> {
        let filter = self.filter;
        self.tasks.iter().filter(move |t| filter.accepts(t.status()))
    }

    /// Tasks due on `date` (local time), in source order
    pub fn tasks_for_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.visible()
            .filter(|t| t.due_day() == Some(date))
            .collect()
    }

    /// Tasks due in the displayed month
    pub fn tasks_for_month(&self) -> Vec<&Task> {
        self.tasks_for_month_of(self.reference)
    }

    /// Tasks due in the month of `reference`, first and last days included
    pub fn tasks_for_month_of(&self, reference: NaiveDate) -> Vec<&Task> {
        let first = grid::first_of_month(reference);
        let last = grid::last_of_month(reference);
        self.visible()
            .filter(|t| match t.due_day() {
                Some(day) => first <= day && day <= last,
                None => false,
            })
            .collect()
    }

    /// Tasks due on the selected day
    pub fn selected_tasks(&self) -> Vec<&Task> {
        self.tasks_for_date(self.selected)
    }

    /// Every cell of the month grid, from the Sunday before the first of the month to the Saturday after its last day
    pub fn renderable_days(&self, clock: &dyn Clock) -> Vec<CalendarDay> {
        let today = clock.today();
        grid::month_grid(self.reference)
            .into_iter()
            .map(|date| CalendarDay {
                date,
                in_reference_month: grid::same_month(date, self.reference),
                is_today: date == today,
                is_selected: date == self.selected,
                tasks: self.tasks_for_date(date).into_iter().cloned().collect(),
            })
            .collect()
    }

    pub fn next_month(&mut self) {
        self.reference = grid::add_months(self.reference, 1);
    }

    pub fn previous_month(&mut self) {
        self.reference = grid::add_months(self.reference, -1);
    }

    /// Display the current month
    pub fn go_to_today(&mut self, clock: &dyn Clock) {
        self.reference = clock.today();
    }
}
