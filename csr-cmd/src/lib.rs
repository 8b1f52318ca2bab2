//! Command implementations for the crop stress risk CLI.
//!
//! Provides subcommands for fetching weekly stress risk from the
//! prediction service, aggregating saved payloads offline, and printing
//! the mock fallback series.

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use csr_core::{
    client::{FetchMode, StressClient, DEFAULT_API_URL},
    Crop,
};
use std::{path::PathBuf, time::Duration};

pub mod offline;
pub mod output;
pub mod risk;

use output::OutputFormat;

/// Connection settings for the prediction service.
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Base URL of the prediction service
    #[arg(long, env = "CSR_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Request both payloads at once instead of one after the other
    #[arg(long)]
    pub concurrent: bool,
}

impl ServiceArgs {
    pub fn client(&self) -> anyhow::Result<StressClient> {
        Ok(StressClient::new(
            &self.api_url,
            Duration::from_secs(self.timeout_secs),
        )?)
    }

    pub fn fetch_mode(&self) -> FetchMode {
        if self.concurrent {
            FetchMode::Concurrent
        } else {
            FetchMode::Sequential
        }
    }
}

/// How results are printed.
#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// First day of week 0 (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = csr_utils::dates::parse_date)]
    pub start: Option<NaiveDate>,
}

impl DisplayArgs {
    pub fn start_date(&self) -> NaiveDate {
        self.start.unwrap_or_else(csr_utils::dates::today)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch weekly stress risk for a crop and show one gauge per week
    Risk {
        /// Crop to query (soybean, corn, cotton, rice, wheat)
        #[arg(short, long, default_value_t = Crop::Soybean)]
        crop: Crop,

        #[command(flatten)]
        service: ServiceArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Fetch weekly stress risk for a crop and list stress alerts and warnings
    Alerts {
        /// Crop to query (soybean, corn, cotton, rice, wheat)
        #[arg(short, long, default_value_t = Crop::Soybean)]
        crop: Crop,

        #[command(flatten)]
        service: ServiceArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Aggregate saved temperature and drought stress payloads
    Aggregate {
        /// Path to a saved temp_stress JSON payload
        #[arg(short, long)]
        temp_stress: PathBuf,

        /// Path to a saved drought_stress JSON payload
        #[arg(short, long)]
        drought: PathBuf,

        /// Explicit week order (comma separated); defaults to payload order
        #[arg(short, long, value_delimiter = ',')]
        weeks: Vec<String>,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Print a mock weekly risk series
    Mock {
        /// Seed for a reproducible series
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        display: DisplayArgs,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    let output = match command {
        Command::Risk {
            crop,
            service,
            display,
        } => risk::run_risk(crop, &service, &display).await?,
        Command::Alerts {
            crop,
            service,
            display,
        } => risk::run_alerts(crop, &service, &display).await?,
        Command::Aggregate {
            temp_stress,
            drought,
            weeks,
            display,
        } => offline::run_aggregate(&temp_stress, &drought, &weeks, &display)?,
        Command::Mock { seed, display } => offline::run_mock(seed, &display)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}
