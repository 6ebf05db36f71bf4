use anyhow::Result;
use chrono::NaiveDate;
use monthcal_core::MonthView;
use owo_colors::OwoColorize;

use crate::commands::open_session;
use crate::render::render_day;

pub async fn run(date: NaiveDate, json: bool) -> Result<()> {
    let (_, session) = open_session(MonthView::containing(date)?).await?;
    let events = session.events_on(date);

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for line in render_day(date, &events) {
        println!("{}", line);
    }

    Ok(())
}
