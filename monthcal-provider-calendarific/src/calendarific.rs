//! Calendarific holiday API client.

use anyhow::{Context, Result, anyhow};
use monthcal_core::RawHoliday;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://calendarific.com/api/v2/holidays";
const DEFAULT_COUNTRY: &str = "IN";
const DEFAULT_HOLIDAY_TYPE: &str = "national";
const API_KEY_ENV: &str = "CALENDARIFIC_API_KEY";

#[derive(Debug, Deserialize)]
struct ListHolidaysParams {
    year: i32,
    api_key: Option<String>,
    #[serde(default = "default_country")]
    country: String,
    #[serde(default = "default_holiday_type")]
    holiday_type: String,
    #[serde(default = "default_base_url")]
    base_url: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_holiday_type() -> String {
    DEFAULT_HOLIDAY_TYPE.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    meta: Meta,
    /// An object on success, an empty array on most errors
    #[serde(default)]
    response: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Meta {
    code: u16,
    error_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HolidaysBody {
    holidays: Vec<ApiHoliday>,
}

#[derive(Debug, Deserialize)]
struct ApiHoliday {
    name: String,
    date: ApiDate,
}

#[derive(Debug, Deserialize)]
struct ApiDate {
    iso: String,
}

pub async fn handle_list_holidays(params: serde_json::Value) -> Result<Vec<RawHoliday>> {
    let params: ListHolidaysParams =
        serde_json::from_value(params).context("Invalid list_holidays params")?;

    let api_key = match params.api_key.clone() {
        Some(key) => key,
        None => std::env::var(API_KEY_ENV)
            .with_context(|| format!("No api_key configured and {} is not set", API_KEY_ENV))?,
    };

    let url = build_url(&params, &api_key)?;
    tracing::debug!(year = params.year, country = %params.country, "requesting holidays");

    let body = reqwest::get(url)
        .await
        .context("Failed to reach Calendarific")?
        .text()
        .await
        .context("Failed to read Calendarific response")?;

    parse_holidays(&body)
}

fn build_url(params: &ListHolidaysParams, api_key: &str) -> Result<Url> {
    let year = params.year.to_string();
    Url::parse_with_params(
        &params.base_url,
        &[
            ("api_key", api_key),
            ("country", params.country.as_str()),
            ("year", year.as_str()),
            ("type", params.holiday_type.as_str()),
        ],
    )
    .with_context(|| format!("Invalid base_url '{}'", params.base_url))
}

fn parse_holidays(body: &str) -> Result<Vec<RawHoliday>> {
    let envelope: ApiEnvelope =
        serde_json::from_str(body).context("Calendarific returned malformed JSON")?;

    if envelope.meta.code != 200 {
        return Err(anyhow!(
            "Calendarific error {}: {}",
            envelope.meta.code,
            envelope.meta.error_detail.unwrap_or_else(|| "no details".into())
        ));
    }

    let body: HolidaysBody = serde_json::from_value(envelope.response)
        .context("Calendarific response has no holiday list")?;

    Ok(body
        .holidays
        .into_iter()
        .map(|h| RawHoliday {
            name: h.name,
            iso_date: h.date.iso,
        })
        .collect())
}
