//! Client for the stress prediction service.
//!
//! Two unauthenticated GET endpoints feed the aggregation: per-crop
//! temperature stress and drought stress. A failed or unusable response
//! is never retried; [`StressClient::load_report`] substitutes the mock
//! series instead.

use log::{debug, info};
use rand::Rng;
use reqwest::Client;
use std::time::Duration;

use crate::{
    aggregate::aggregate_default,
    error::{Result, StressError},
    payload::{DroughtPayload, TempStressPayload},
    Crop, RiskReport, WeeklyRisk,
};

/// Default location of the prediction service.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the two payload requests are issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchMode {
    /// Temperature stress first, then drought.
    #[default]
    Sequential,
    /// Both requests in flight at once.
    Concurrent,
}

#[derive(Debug, Clone)]
pub struct StressClient {
    client: Client,
    base_url: String,
}

impl StressClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        StressClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn temp_stress_url(&self, crop: Crop) -> String {
        format!("{}/api/predict/temp_stress/{}", self.base_url, crop.as_str())
    }

    pub fn drought_stress_url(&self) -> String {
        format!("{}/api/predict/drought_stress", self.base_url)
    }

    async fn http_request_body(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("{} answered {}", url, status);
        if !status.is_success() {
            return Err(StressError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    pub async fn fetch_temp_stress(&self, crop: Crop) -> Result<TempStressPayload> {
        let url = self.temp_stress_url(crop);
        info!("Fetching temperature stress for {} from {}", crop, url);
        let body = self.http_request_body(&url).await?;
        TempStressPayload::from_json(&body)
    }

    pub async fn fetch_drought_stress(&self) -> Result<DroughtPayload> {
        let url = self.drought_stress_url();
        info!("Fetching drought stress from {}", url);
        let body = self.http_request_body(&url).await?;
        DroughtPayload::from_json(&body)
    }

    /// Fetch both payloads and aggregate them into the weekly series.
    pub async fn fetch_weekly_risk(&self, crop: Crop, mode: FetchMode) -> Result<Vec<WeeklyRisk>> {
        let (temp_stress, drought) = match mode {
            FetchMode::Sequential => {
                let temp_stress = self.fetch_temp_stress(crop).await?;
                let drought = self.fetch_drought_stress().await?;
                (temp_stress, drought)
            }
            FetchMode::Concurrent => {
                futures::try_join!(self.fetch_temp_stress(crop), self.fetch_drought_stress())?
            }
        };
        aggregate_default(&temp_stress, &drought)
    }

    /// One request cycle for the dashboard: live data when usable, the mock
    /// series otherwise.
    pub async fn load_report<R: Rng>(&self, crop: Crop, mode: FetchMode, rng: R) -> RiskReport {
        let result = self.fetch_weekly_risk(crop, mode).await;
        RiskReport::from_result(crop, result, rng)
    }
}
