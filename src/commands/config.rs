use anyhow::Result;
use monthcal_core::config::MonthcalConfig;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config = MonthcalConfig::load()?;

    println!("{} {}", "Config:".bold(), MonthcalConfig::config_path()?.display());
    println!("{} {}", "Events:".bold(), config.data_path().display());
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}
