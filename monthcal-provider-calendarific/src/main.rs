//! monthcal-provider-calendarific - public holidays for monthcal
//!
//! This binary implements the monthcal provider protocol, reading one JSON
//! request per line on stdin and answering on stdout. Logs go to stderr.

mod calendarific;

use std::io::{self, BufRead, Write};

use monthcal_core::protocol::{Command, Request, Response};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle_request(request).await,
            Err(e) => Response::error(&format!("Failed to parse request: {}", e)),
        };

        if let Err(e) = writeln!(stdout, "{}", response).and_then(|_| stdout.flush()) {
            tracing::error!("Failed to write response: {}", e);
            break;
        }
    }
}

async fn handle_request(request: Request) -> String {
    match request.command {
        Command::ListHolidays => match calendarific::handle_list_holidays(request.params).await {
            Ok(holidays) => Response::success(holidays),
            Err(e) => Response::error(&format!("{:#}", e)),
        },
    }
}
