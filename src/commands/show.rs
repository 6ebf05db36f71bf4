use anyhow::Result;
use chrono::{Datelike, Local};
use monthcal_core::{HolidaySync, MonthView};
use owo_colors::OwoColorize;

use crate::commands::open_session;
use crate::render::{render_day, render_grid};

pub async fn run(year: Option<i32>, month: Option<u32>, offline: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let view = MonthView::new(year.unwrap_or(today.year()), month.unwrap_or(today.month()))?;

    let (config, mut session) = open_session(view).await?;

    if !offline && config.holidays.is_some() {
        match session.sync_holidays().await {
            Ok(HolidaySync::Merged { accepted, .. }) if accepted > 0 => {
                tracing::info!(accepted, "added holidays");
            }
            Ok(_) => {}
            // A failed fetch only costs this run its holidays
            Err(e) if e.is_external_fetch() => {
                eprintln!("{}", format!("Holidays unavailable: {}", e).dimmed());
            }
            Err(e) => return Err(e.into()),
        }
    }

    let cells = session.grid();
    println!(
        "{}",
        render_grid(session.view(), session.week_start(), &cells, |date| {
            !session.events_on(date).is_empty()
        })
    );

    let mut days = cells
        .iter()
        .filter(|cell| cell.in_current_month)
        .map(|cell| (cell.date, session.events_on(cell.date)))
        .filter(|(_, events)| !events.is_empty())
        .peekable();

    if days.peek().is_some() {
        println!();
    }
    for (date, events) in days {
        for line in render_day(date, &events) {
            println!("{}", line);
        }
    }

    Ok(())
}
