pub mod add;
pub mod config;
pub mod events;
pub mod holidays;
pub mod remove;
pub mod show;

use anyhow::{Context, Result};
use monthcal_core::config::MonthcalConfig;
use monthcal_core::provider::Provider;
use monthcal_core::{CalendarSession, JsonFileGateway, MonthView, SessionSettings};

pub type Session = CalendarSession<JsonFileGateway, Option<Provider>>;

/// Load config and open a session on `view`.
pub async fn open_session(view: MonthView) -> Result<(MonthcalConfig, Session)> {
    let config = MonthcalConfig::load().context("Failed to load config")?;

    let settings = SessionSettings {
        week_start: config.week_start,
        fetch_timeout: config.fetch_timeout()?,
        initial_view: view,
    };

    let gateway = JsonFileGateway::new(config.data_path());
    let session = CalendarSession::open(gateway, config.holiday_provider(), settings)
        .await
        .with_context(|| format!("Failed to load events from {}", config.data_path().display()))?;

    Ok((config, session))
}
