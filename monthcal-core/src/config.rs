//! Global monthcal configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalError, CalResult};
use crate::grid::WeekStart;
use crate::provider::Provider;

static DEFAULT_DATA_FILE: &str = "~/.local/share/monthcal/events.json";
static DEFAULT_FETCH_TIMEOUT: &str = "10s";
static ENV_PREFIX: &str = "MONTHCAL";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_fetch_timeout() -> String {
    DEFAULT_FETCH_TIMEOUT.to_string()
}

/// Configuration at ~/.config/monthcal/config.toml, overridable with
/// `MONTHCAL_*` environment variables (`MONTHCAL_HOLIDAYS__COUNTRY=US`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthcalConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    #[serde(default)]
    pub week_start: WeekStart,

    /// How long to wait for a holiday provider, e.g. "10s" or "1m"
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<HolidayConfig>,
}

/// The `[holidays]` table. Everything besides `provider` is handed to
/// the provider untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayConfig {
    pub provider: String,
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl Default for MonthcalConfig {
    fn default() -> Self {
        MonthcalConfig {
            data_file: default_data_file(),
            week_start: WeekStart::default(),
            fetch_timeout: default_fetch_timeout(),
            holidays: None,
        }
    }
}

impl MonthcalConfig {
    pub fn config_path() -> CalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalError::Config("Could not determine config directory".into()))?
            .join("monthcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// there is none yet.
    pub fn load() -> CalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> CalResult<Self> {
        let config: MonthcalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| CalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CalResult<()> {
        self.fetch_timeout()?;
        if let Some(holidays) = &self.holidays {
            if holidays.provider.trim().is_empty() {
                return Err(CalError::Config("holidays.provider cannot be empty".into()));
            }
        }
        Ok(())
    }

    /// Data file path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn fetch_timeout(&self) -> CalResult<Duration> {
        humantime::parse_duration(&self.fetch_timeout).map_err(|e| {
            CalError::Config(format!("Invalid fetch_timeout '{}': {}", self.fetch_timeout, e))
        })
    }

    /// The configured holiday provider, if any.
    pub fn holiday_provider(&self) -> Option<Provider> {
        self.holidays
            .as_ref()
            .map(|h| Provider::new(&h.provider, h.params.clone()))
    }

    pub fn to_toml(&self) -> CalResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalResult<()> {
        let contents = format!(
            "\
# monthcal configuration

# Where events are stored:
# data_file = \"{}\"

# First column of the month grid (\"sunday\" or \"monday\"):
# week_start = \"sunday\"

# How long to wait for the holiday provider:
# fetch_timeout = \"{}\"

# Public holidays, fetched through monthcal-provider-<provider>:
# [holidays]
# provider = \"calendarific\"
# country = \"IN\"
",
            DEFAULT_DATA_FILE, DEFAULT_FETCH_TIMEOUT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monthcal/config.toml");
        MonthcalConfig::create_default_config(&path).unwrap();

        let config = MonthcalConfig::load_from(&path).unwrap();
        assert_eq!(config.week_start, WeekStart::Sunday);
        assert_eq!(config.fetch_timeout().unwrap(), Duration::from_secs(10));
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert!(config.holiday_provider().is_none());
    }

    #[test]
    fn test_holiday_table_keeps_provider_params() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
week_start = "monday"
fetch_timeout = "2s 500ms"

[holidays]
provider = "calendarific"
country = "IN"
"#,
        )
        .unwrap();

        let config = MonthcalConfig::load_from(&path).unwrap();
        assert_eq!(config.week_start, WeekStart::Monday);
        assert_eq!(config.fetch_timeout().unwrap(), Duration::from_millis(2500));

        let holidays = config.holidays.as_ref().unwrap();
        assert_eq!(holidays.provider, "calendarific");
        assert_eq!(holidays.params["country"], "IN");
        assert_eq!(config.holiday_provider().unwrap().name(), "calendarific");
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fetch_timeout = \"soon\"\n").unwrap();

        assert!(matches!(
            MonthcalConfig::load_from(&path),
            Err(CalError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = MonthcalConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
    }
}
