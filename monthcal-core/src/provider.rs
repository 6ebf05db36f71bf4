//! Holiday provider subprocesses.
//!
//! A provider is any executable named `monthcal-provider-<name>` on PATH
//! that reads one JSON request line on stdin and answers with one JSON
//! response on stdout. Providers own their credentials; monthcal only
//! forwards the params from the `[holidays]` config table.

use std::path::PathBuf;

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;

use crate::error::{CalError, CalResult};
use crate::holiday::{Holiday, HolidaySource, validate_batch};
use crate::protocol::{Command, ListHolidays, ProviderCommand, Request, Response};

const BINARY_PREFIX: &str = "monthcal-provider-";

#[derive(Clone, Debug)]
pub struct Provider {
    name: String,
    params: serde_json::Map<String, serde_json::Value>,
}

impl Provider {
    pub fn new(name: &str, params: serde_json::Map<String, serde_json::Value>) -> Self {
        Provider {
            name: name.to_string(),
            params,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn binary_path(&self) -> CalResult<PathBuf> {
        let binary_name = format!("{}{}", BINARY_PREFIX, self.name);
        which::which(&binary_name).map_err(|_| CalError::ProviderNotInstalled(binary_name))
    }

    /// Call a typed provider command and return the result.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> CalResult<C::Response> {
        self.call_raw(C::command(), cmd).await
    }

    /// Send one command and deserialize the response.
    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> CalResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| CalError::ExternalFetch(format!("Failed to encode params: {}", e)))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| CalError::ExternalFetch(format!("Failed to encode request: {}", e)))?;

        let binary_path = self.binary_path()?;
        tracing::debug!(provider = %self.name, binary = %binary_path.display(), ?command, "calling provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CalError::ExternalFetch(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CalError::ExternalFetch("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await
            .map_err(|e| CalError::ExternalFetch(format!("Failed to write request: {}", e)))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CalError::ExternalFetch(format!("Provider did not finish: {}", e)))?;

        if !output.status.success() {
            return Err(CalError::ExternalFetch(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(CalError::ExternalFetch("Provider returned no response".into()));
        }

        let response: Response<R> = serde_json::from_str(response_str.trim())
            .map_err(|e| CalError::ExternalFetch(format!("Failed to parse response: {}", e)))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(CalError::ExternalFetch(error)),
        }
    }
}

impl HolidaySource for Provider {
    async fn fetch(&self, year: i32) -> CalResult<Vec<Holiday>> {
        let raw = self
            .call(ListHolidays {
                provider_config: self.params.clone(),
                year,
            })
            .await?;
        let holidays = validate_batch(year, &raw)?;
        tracing::debug!(provider = %self.name, year, count = holidays.len(), "fetched holidays");
        Ok(holidays)
    }
}
