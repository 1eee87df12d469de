use std::error::Error;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use taskboard::client::Client;
use taskboard::clock::{Clock, SystemClock};
use taskboard::config::Settings;
use taskboard::notifications::DataOrigin;
use taskboard::{CalendarView, NotificationSynchronizer};

/// Parse a `YYYY-MM` argument into the first day of that month
fn parse_month(arg: &str) -> Result<NaiveDate, Box<dyn Error + Send + Sync>> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", arg.trim()), "%Y-%m-%d")
        .map_err(|err| format!("Invalid month {:?} (expected YYYY-MM): {}", arg, err))?;
    Ok(date)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::init();

    let settings = Settings::from_env()?;
    let clock = SystemClock;
    let reference = match std::env::args().nth(1) {
        Some(arg) => parse_month(&arg)?,
        None => clock.today(),
    };

    println!("Using server {}", settings.api_url);
    println!("Depending on your RUST_LOG value, you may see more or less details about the requests.");

    let client = Arc::new(Client::from_settings(&settings));
    let mut synchronizer = NotificationSynchronizer::create(
        Arc::clone(&client),
        Arc::new(clock),
        settings.poll_interval,
    );
    let outcome = synchronizer.mount().await;
    log::info!("Initial notification fetch: {}", outcome);

    let state = synchronizer.state();
    if state.origin() == DataOrigin::Fallback {
        println!("The server could not be reached, showing the offline notifications.");
    }
    taskboard::utils::print_notifications(&state, clock.now());

    let mut view = CalendarView::at(Vec::new(), reference);
    if let Err(err) = view.refresh(&client).await {
        println!("Failed to load tasks: {}", err);
    }

    println!();
    println!("---- {} {} -----", reference.format("%B"), reference.year());
    taskboard::utils::print_calendar_grid(&view.renderable_days(&clock));

    println!();
    println!("---- Tasks for {} -----", view.selected().format("%b %d, %Y"));
    taskboard::utils::print_tasks(&view.selected_tasks());

    synchronizer.dispose();
    Ok(())
}
