use crate::models::{Menu, Region, Restaurant};
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the CROUStillant API
#[derive(Debug, Error)]
pub enum CroustillantError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API reported failure: {0}")]
    Unsuccessful(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Envelope wrapping every API payload
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// CROUStillant REST API client
///
/// Thin wrapper over the public API used by the mobile app:
/// - Listing restaurants and regions
/// - Fetching a single restaurant
/// - Fetching a restaurant's menu for a given day
pub struct CroustillantClient {
    base_url: String,
    version: String,
    client: Client,
}

impl CroustillantClient {
    /// Create a new API client
    pub fn new(base_url: String, version: String, timeout_secs: u64) -> Result<Self, CroustillantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            version,
            client,
        })
    }

    /// Build `{base}/{version}/{endpoint}`
    pub fn url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.version.trim_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CroustillantError> {
        let url = self.url(endpoint);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CroustillantError::NotFound(endpoint.to_string()));
        }
        if !status.is_success() {
            return Err(CroustillantError::ApiError(format!(
                "GET {} returned {}",
                endpoint, status
            )));
        }

        let body = response.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            CroustillantError::InvalidResponse(format!("Failed to parse {}: {}", endpoint, e))
        })?;

        if !envelope.success {
            return Err(CroustillantError::Unsuccessful(
                envelope.message.unwrap_or_else(|| endpoint.to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| CroustillantError::InvalidResponse(format!("Missing data for {}", endpoint)))
    }

    /// Fetch every restaurant
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CroustillantError> {
        let restaurants: Vec<Restaurant> = self.get("restaurants").await?;
        tracing::debug!("Fetched {} restaurants", restaurants.len());
        Ok(restaurants)
    }

    /// Fetch a single restaurant by code
    pub async fn get_restaurant(&self, code: i64) -> Result<Restaurant, CroustillantError> {
        self.get(&format!("restaurants/{}", code)).await
    }

    /// Fetch the menu of a restaurant for one day
    pub async fn get_menu(&self, code: i64, date: NaiveDate) -> Result<Menu, CroustillantError> {
        self.get(&format!("restaurants/{}/menu/{}", code, format_date_for_api(date)))
            .await
    }

    /// Fetch every region
    pub async fn list_regions(&self) -> Result<Vec<Region>, CroustillantError> {
        self.get("regions").await
    }
}

/// The API expects menu dates as `DD-MM-YYYY`
pub fn format_date_for_api(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
