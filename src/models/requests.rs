use crate::core::{FilterKind, FilterState};
use crate::models::domain::{Language, ObserverLocation, ThemePreference};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to search the restaurant list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRestaurantsRequest {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub query: String,
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    #[validate(custom(function = "validate_region"))]
    pub favorite_region: Option<String>,
    #[serde(default)]
    pub device_id: Option<uuid::Uuid>,
    #[serde(default)]
    pub nearby: bool,
    #[serde(default)]
    pub observer: Option<ObserverLocation>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: usize,
    #[serde(default)]
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<usize>,
}

fn default_page() -> usize {
    1
}

/// Request to flip one filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleFilterRequest {
    #[serde(default)]
    pub filters: FilterState,
    pub filter: FilterKind,
}

/// Request to clear every filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetFiltersRequest {
    #[serde(default)]
    pub filters: FilterState,
}

/// Request to set the favorite region
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetRegionRequest {
    #[validate(length(min = 1), custom(function = "validate_region"))]
    pub region: String,
}

/// Request to change display settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub theme: Option<ThemePreference>,
}

/// Request to save a favorite restaurant
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddFavoriteRequest {
    #[validate(length(min = 1, max = 32))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub city: String,
}

/// Query string of the menu endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    pub date: Option<chrono::NaiveDate>,
}

/// A favorite region is `"all"` or a region code
pub fn validate_region(region: &str) -> Result<(), ValidationError> {
    if is_valid_region(region) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_region"))
    }
}

pub fn is_valid_region(region: &str) -> bool {
    region == crate::models::ALL_REGIONS || region.parse::<i64>().is_ok()
}
