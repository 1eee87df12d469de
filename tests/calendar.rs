//! Month views of task lists

use chrono::{Datelike, Local, NaiveDate, TimeZone, Utc};

use taskboard::calendar::grid::{add_months, first_of_month, last_of_month, DAYS_PER_WEEK};
use taskboard::clock::FixedClock;
use taskboard::mock_behaviour::MockBehaviour;
use taskboard::mock_source::MockSource;
use taskboard::task::{TaskPriority, TaskStatus};
use taskboard::{CalendarView, Task};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task_at(id: &str, y: i32, m: u32, d: u32, h: u32) -> Task {
    let due = Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().with_timezone(&Utc);
    Task::new(id, format!("Task {}", id), Some(due), TaskPriority::High, TaskStatus::Pending)
        .with_description(format!("Due on {}-{:02}-{:02}", y, m, d))
}

fn clock_on(date: NaiveDate) -> FixedClock {
    let noon = Local.from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap()).unwrap();
    FixedClock::new(noon.with_timezone(&Utc))
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id().to_string()).collect()
}

fn march_tasks() -> Vec<Task> {
    vec![
        task_at("first", 2024, 3, 1, 9),
        task_at("second", 2024, 3, 1, 15),
        task_at("third", 2024, 3, 15, 0),
    ]
}

#[test]
fn test_march_scenario() {
    let view = CalendarView::at(march_tasks(), ymd(2024, 3, 10));

    assert_eq!(ids(&view.tasks_for_month()), vec!["first", "second", "third"]);
    assert_eq!(ids(&view.tasks_for_month_of(ymd(2024, 3, 10))), vec!["first", "second", "third"]);
    assert_eq!(ids(&view.tasks_for_date(ymd(2024, 3, 1))), vec!["first", "second"]);
    assert!(view.tasks_for_date(ymd(2024, 3, 2)).is_empty());
    assert_eq!(ids(&view.tasks_for_date(ymd(2024, 3, 15))), vec!["third"]);
    assert_eq!(view.tasks_for_date(ymd(2024, 3, 15))[0].description(), "Due on 2024-03-15");

    assert!(view.tasks_for_month_of(ymd(2024, 2, 10)).is_empty());
    assert!(view.tasks_for_month_of(ymd(2024, 4, 10)).is_empty());
}

#[test]
fn test_days_add_up_to_the_month() {
    let mut tasks = Vec::new();
    // Tasks on month boundaries, and around midnight
    for (i, (m, d, h)) in [(1, 31, 23), (2, 1, 0), (2, 14, 12), (2, 29, 23), (3, 1, 0), (2, 29, 0), (2, 14, 12)].iter().enumerate() {
        tasks.push(task_at(&i.to_string(), 2024, *m, *d, *h));
    }
    let view = CalendarView::at(tasks, ymd(2024, 2, 1));

    for month in &[ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)] {
        let mut by_day = Vec::new();
        let mut day = first_of_month(*month);
        while day <= last_of_month(*month) {
            by_day.extend(view.tasks_for_date(day));
            day = day.succ_opt().unwrap();
        }
        let mut from_days = ids(&by_day);
        let mut from_month = ids(&view.tasks_for_month_of(*month));
        from_days.sort();
        from_month.sort();
        assert_eq!(from_days, from_month, "{}", month);
    }
    assert_eq!(view.tasks_for_month().len(), 5);
}

#[test]
fn test_grids_are_made_of_weeks() {
    let mut view = CalendarView::at(march_tasks(), ymd(2023, 11, 30));
    let clock = clock_on(ymd(2024, 3, 1));
    for _ in 0..24 {
        let days = view.renderable_days(&clock);
        assert_eq!(days.len() % DAYS_PER_WEEK, 0);
        let month_len = last_of_month(view.reference()).day() as usize;
        assert_eq!(days.iter().filter(|d| d.in_reference_month).count(), month_len);
        view.next_month();
    }
    // Navigation is step by step: the day of month was clamped to 29 in February 2024, then to 28 in February 2025
    assert_eq!(view.reference(), ymd(2025, 11, 28));
    assert_eq!(add_months(ymd(2023, 11, 30), 24), ymd(2025, 11, 30));
}

#[test]
fn test_march_grid() {
    let view = CalendarView::at(march_tasks(), ymd(2024, 3, 10));
    let days = view.renderable_days(&clock_on(ymd(2024, 3, 15)));

    assert_eq!(days.len(), 42);
    assert_eq!(days[0].date, ymd(2024, 2, 25));
    assert_eq!(days[0].in_reference_month, false);

    let first = days.iter().find(|d| d.date == ymd(2024, 3, 1)).unwrap();
    assert_eq!(first.tasks.len(), 2);
    assert_eq!(first.overflow(), None);
    assert_eq!(first.is_today, false);

    let fifteenth = days.iter().find(|d| d.date == ymd(2024, 3, 15)).unwrap();
    assert!(fifteenth.is_today);
    assert_eq!(fifteenth.displayed()[0].id(), "third");

    let selected: Vec<_> = days.iter().filter(|d| d.is_selected).map(|d| d.date).collect();
    assert_eq!(selected, vec![ymd(2024, 3, 10)]);
}

#[test]
fn test_overflow_is_n_minus_three() {
    for n in 0..8u32 {
        let tasks: Vec<Task> = (0..n).map(|i| task_at(&i.to_string(), 2024, 5, 20, 8 + i)).collect();
        let view = CalendarView::at(tasks, ymd(2024, 5, 1));
        let days = view.renderable_days(&clock_on(ymd(2024, 5, 1)));
        let day = days.iter().find(|d| d.date == ymd(2024, 5, 20)).unwrap();
        let expected = if n > 3 { Some(n as usize - 3) } else { None };
        assert_eq!(day.overflow(), expected);
        assert_eq!(day.displayed().len(), (n as usize).min(3));
    }
}

#[test]
fn test_navigating_past_the_last_month() {
    let mut view = CalendarView::at(Vec::new(), NaiveDate::MAX);
    view.next_month();
    assert_eq!(view.reference(), NaiveDate::MAX);
    let days = view.renderable_days(&clock_on(ymd(2024, 3, 1)));
    assert_eq!(days.last().map(|d| d.date), Some(NaiveDate::MAX));
    assert!(days.iter().any(|d| d.in_reference_month));

    let mut view = CalendarView::at(Vec::new(), NaiveDate::MIN);
    view.previous_month();
    let days = view.renderable_days(&clock_on(ymd(2024, 3, 1)));
    assert_eq!(days.first().map(|d| d.date), Some(NaiveDate::MIN));
}

#[tokio::test]
async fn test_refresh_from_a_source() {
    let _ = env_logger::builder().is_test(true).try_init();

    let source = MockSource::new(Vec::new(), march_tasks());
    let mut view = CalendarView::at(Vec::new(), ymd(2024, 3, 1));
    assert_eq!(view.refresh(&source).await.unwrap(), 3);
    assert_eq!(view.tasks_for_month().len(), 3);

    // A failed refresh keeps what was there
    source.set_behaviour(MockBehaviour::offline());
    assert!(view.refresh(&source).await.is_err());
    assert_eq!(view.tasks().len(), 3);
}
