use anyhow::Result;
use monthcal_core::MonthView;
use owo_colors::OwoColorize;

use crate::commands::open_session;

pub async fn run(id: &str) -> Result<()> {
    let (_, mut session) = open_session(MonthView::current()).await?;
    let removed = session.remove_event(id).await?;

    println!(
        "{} {} ({})",
        "Removed".red(),
        removed.title,
        removed.start.format("%Y-%m-%d")
    );

    Ok(())
}
