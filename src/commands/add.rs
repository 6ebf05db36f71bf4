use anyhow::Result;
use chrono::NaiveDate;
use monthcal_core::MonthView;
use owo_colors::OwoColorize;

use crate::commands::open_session;
use crate::render::Render;

/// Same path as clicking a date and typing a title into the dialog.
pub async fn run(date: NaiveDate, title: &str) -> Result<()> {
    let (_, mut session) = open_session(MonthView::containing(date)?).await?;

    session.select_date(date);
    session.set_draft_title(title)?;
    let event = session.confirm().await?;

    println!("{} {}", "Created".green(), event.start.format("%a %b %-d"));
    println!("  {}", event.render());

    Ok(())
}
