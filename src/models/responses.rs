use crate::core::{FilterKind, FilterState};
use crate::models::domain::Restaurant;
use crate::services::CacheStats;
use serde::{Deserialize, Serialize};

/// Response for the restaurant search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
    pub favorites: Vec<Restaurant>,
    pub page: usize,
    pub per_page: usize,
    pub total_results: usize,
    pub total_pages: usize,
}

/// Single restaurant with its computed open status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetailResponse {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub open_now: bool,
}

/// Filter state after a toggle or reset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStateResponse {
    pub filters: FilterState,
    pub active: Vec<FilterKind>,
}

impl From<FilterState> for FilterStateResponse {
    fn from(filters: FilterState) -> Self {
        Self {
            active: filters.active_filters(),
            filters,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: CacheStats,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
