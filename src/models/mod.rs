// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DayOpening, DevicePreferences, Dish, FavoriteRestaurant, Language, Meal, Menu, MenuCategory,
    ObserverLocation, Region, RegionRef, Restaurant, RestaurantType, ServiceFlags, ThemePreference,
    ALL_REGIONS,
};
pub use requests::{
    AddFavoriteRequest, MenuQuery, ResetFiltersRequest, SearchRestaurantsRequest, SetRegionRequest,
    ToggleFilterRequest, UpdateSettingsRequest,
};
pub use responses::{
    ErrorResponse, FilterStateResponse, HealthResponse, RestaurantDetailResponse,
    SearchRestaurantsResponse,
};
