mod commands;
mod logging;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "monthcal")]
#[command(about = "Month calendar with your own events and public holidays")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid (defaults to the current month)
    Show {
        #[arg(short, long)]
        year: Option<i32>,

        /// Month number, 1-12
        #[arg(short, long)]
        month: Option<u32>,

        /// Don't fetch holidays
        #[arg(long)]
        offline: bool,
    },
    /// List events on a date
    Events {
        /// Date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an event on a date (09:00-10:00)
    Add {
        /// Date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Event title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Remove an event by id
    Remove { id: String },
    /// Fetch holidays for a year and merge them into your events
    Holidays {
        #[arg(short, long)]
        year: Option<i32>,
    },
    /// Show the config file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Show {
            year,
            month,
            offline,
        } => commands::show::run(year, month, offline).await,
        Commands::Events { date, json } => commands::events::run(date, json).await,
        Commands::Add { date, title } => commands::add::run(date, &title.join(" ")).await,
        Commands::Remove { id } => commands::remove::run(&id).await,
        Commands::Holidays { year } => commands::holidays::run(year).await,
        Commands::Config => commands::config::run(),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
}
