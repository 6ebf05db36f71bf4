//! Defines the JSON protocol used between monthcal and holiday provider
//! binaries over stdin/stdout.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::holiday::RawHoliday;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ListHolidays,
}

/// Request sent from monthcal to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a provider back to monthcal.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

impl<T: Serialize> Response<T> {
    pub fn success(data: T) -> String {
        serde_json::to_string(&Response::Success { data })
            .unwrap_or_else(|e| Response::<()>::error(&format!("Failed to encode response: {}", e)))
    }
}

impl Response<()> {
    pub fn error(msg: &str) -> String {
        // A map with one string field always serializes
        serde_json::json!({ "status": "error", "error": msg }).to_string()
    }
}

/// List the holidays of one year.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListHolidays {
    /// Provider-specific config (e.g. api_key, country)
    #[serde(flatten)]
    pub provider_config: serde_json::Map<String, serde_json::Value>,
    pub year: i32,
}

impl ProviderCommand for ListHolidays {
    type Response = Vec<RawHoliday>;
    fn command() -> Command {
        Command::ListHolidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_holidays_flattens_provider_config() {
        let mut provider_config = serde_json::Map::new();
        provider_config.insert("country".into(), "IN".into());

        let request = Request {
            command: ListHolidays::command(),
            params: serde_json::to_value(ListHolidays {
                provider_config,
                year: 2024,
            })
            .unwrap(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["command"], "list_holidays");
        assert_eq!(json["params"]["country"], "IN");
        assert_eq!(json["params"]["year"], 2024);
    }

    #[test]
    fn test_response_envelopes() {
        let ok: Response<Vec<RawHoliday>> =
            serde_json::from_str(r#"{"status":"success","data":[{"name":"Holi","iso_date":"2024-03-25"}]}"#)
                .unwrap();
        match ok {
            Response::Success { data } => assert_eq!(data[0].name, "Holi"),
            Response::Error { .. } => panic!("expected success"),
        }

        let err: Response<Vec<RawHoliday>> =
            serde_json::from_str(&Response::error("quota exceeded")).unwrap();
        match err {
            Response::Error { error } => assert_eq!(error, "quota exceeded"),
            Response::Success { .. } => panic!("expected error"),
        }
    }
}
