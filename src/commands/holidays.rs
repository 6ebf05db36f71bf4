use anyhow::{Result, bail};
use chrono::{Datelike, Local};
use monthcal_core::config::MonthcalConfig;
use monthcal_core::{HolidaySync, MonthView};
use owo_colors::OwoColorize;

use crate::commands::open_session;

pub async fn run(year: Option<i32>) -> Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    let (config, mut session) = open_session(MonthView::new(year, 1)?).await?;

    let Some(holidays) = &config.holidays else {
        bail!(
            "No holiday provider configured.\n\n\
            Add one to {}:\n  \
            [holidays]\n  \
            provider = \"calendarific\"\n  \
            country = \"IN\"",
            MonthcalConfig::config_path()?.display()
        );
    };

    println!("Fetching {} holidays from {}...", year, holidays.provider);

    match session.sync_holidays().await? {
        HolidaySync::Merged { accepted: 0, .. } => {
            println!("{}", "Already up to date".dimmed());
        }
        HolidaySync::Merged { accepted, .. } => {
            println!("{} {} holidays", "Added".green(), accepted);
        }
        HolidaySync::Stale { .. } | HolidaySync::Idle => {
            println!("{}", "Nothing to merge".dimmed());
        }
    }

    Ok(())
}
