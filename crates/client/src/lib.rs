pub mod error;

pub use error::ApiError;

use hensai_core::{RepaymentUpdate, ScheduleEntry};
use serde::Deserialize;

/// Environment variable carrying the base URL of the repayment service.
pub const ENDPOINT_ENV: &str = "HENSAI_API_ENDPOINT";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
}

impl ApiConfig {
    /// Reads the endpoint from the environment. A missing endpoint is a
    /// configuration error raised here, before any request is attempted.
    pub fn from_env() -> Result<Self, ApiError> {
        match std::env::var(ENDPOINT_ENV) {
            Ok(v) if !v.trim().is_empty() => Ok(ApiConfig { endpoint: v }),
            _ => Err(ApiError::Config(format!("{ENDPOINT_ENV} is not set"))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    items: Vec<ScheduleEntry>,
}

/// One-shot client for the repayment service. No retries, no cancellation;
/// each call is a single request/response exchange.
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        ApiClient {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `GET {endpoint}/repayments/schedule` → the full schedule list.
    pub async fn fetch_schedule(&self) -> Result<Vec<ScheduleEntry>, ApiError> {
        let url = format!("{}/repayments/schedule", self.endpoint);
        tracing::debug!(%url, "fetching repayment schedule");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Api {
                status: response.status().as_u16(),
            });
        }

        let body: ScheduleResponse = response.json().await?;
        tracing::info!(count = body.items.len(), "schedule fetched");
        Ok(body.items)
    }

    /// `POST {endpoint}/transactions/uploads` with the reconciled status
    /// transitions as a JSON array.
    pub async fn upload_updates(&self, updates: &[RepaymentUpdate]) -> Result<(), ApiError> {
        let url = format!("{}/transactions/uploads", self.endpoint);
        tracing::debug!(%url, count = updates.len(), "uploading status transitions");

        let response = self.http.post(&url).json(updates).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Api {
                status: response.status().as_u16(),
            });
        }

        tracing::info!(count = updates.len(), "upload accepted");
        Ok(())
    }
}
