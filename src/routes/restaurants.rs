use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{is_open_at, paginate, split_favorites, wall_clock_now, FilterEngine, FilterQuery};
use crate::models::{
    ErrorResponse, FavoriteRestaurant, FilterStateResponse, HealthResponse, MenuQuery, Region,
    ResetFiltersRequest, Restaurant, RestaurantDetailResponse, SearchRestaurantsRequest,
    SearchRestaurantsResponse, ToggleFilterRequest,
};
use crate::services::{CacheError, CacheKey, CacheManager, CroustillantClient, CroustillantError, PreferenceStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<CroustillantClient>,
    pub cache: Arc<CacheManager>,
    pub preferences: Arc<PreferenceStore>,
    pub engine: FilterEngine,
    pub per_page: usize,
    pub max_per_page: usize,
    /// Zone the open-now predicate and default menu date are evaluated in
    pub timezone: chrono_tz::Tz,
}

/// Configure all restaurant-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/restaurants/search", web::post().to(search_restaurants))
        .route("/restaurants/{code}", web::get().to(get_restaurant))
        .route("/restaurants/{code}/menu", web::get().to(get_menu))
        .route("/regions", web::get().to(list_regions))
        .route("/filters/toggle", web::post().to(toggle_filter))
        .route("/filters/reset", web::post().to(reset_filters));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.preferences.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: state.cache.stats(),
        timestamp: chrono::Utc::now(),
    })
}

/// Map an upstream API failure to an HTTP response
pub(crate) fn upstream_error(context: &str, err: CroustillantError) -> HttpResponse {
    match err {
        CroustillantError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Not found",
            format!("{} not found upstream: {}", context, what),
            404,
        )),
        other => {
            tracing::error!("Upstream API failure ({}): {}", context, other);
            HttpResponse::BadGateway().json(ErrorResponse::new(
                format!("Failed to fetch {}", context),
                other.to_string(),
                502,
            ))
        }
    }
}

/// Restaurant list, from cache when possible
pub(crate) async fn load_restaurants(state: &AppState) -> Result<Vec<Restaurant>, CroustillantError> {
    let key = CacheKey::restaurants();
    match state.cache.get::<Vec<Restaurant>>(&key).await {
        Ok(restaurants) => return Ok(restaurants),
        Err(CacheError::SerializationError(e)) => {
            // Entry written by an older record layout
            tracing::warn!("Dropping unreadable cached restaurant list: {}", e);
            if let Err(e) = state.cache.delete(&key).await {
                tracing::warn!("Failed to evict {}: {}", key, e);
            }
        }
        Err(_) => {}
    }

    let restaurants = state.api.list_restaurants().await?;
    if let Err(e) = state.cache.set(&key, &restaurants).await {
        tracing::warn!("Failed to cache restaurant list: {}", e);
    }

    Ok(restaurants)
}

/// Search restaurants endpoint
///
/// POST /api/v1/restaurants/search
///
/// Request body:
/// ```json
/// {
///   "query": "string",
///   "filters": { "nameAscending": true, "openNow": false, "region": null },
///   "favoriteRegion": "all",
///   "deviceId": "uuid",
///   "nearby": false,
///   "observer": { "latitude": 48.69, "longitude": 6.18 },
///   "page": 1,
///   "perPage": 20
/// }
/// ```
async fn search_restaurants(
    state: web::Data<AppState>,
    req: web::Json<SearchRestaurantsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    // Stored preferences fill in what the request leaves out
    let (stored_region, favorites): (Option<String>, Vec<FavoriteRestaurant>) = match req.device_id {
        Some(device_id) => match state.preferences.get_preferences(device_id).await {
            Ok(prefs) => (Some(prefs.favorite_region), prefs.favorite_restaurants),
            Err(e) => {
                tracing::warn!("Failed to load preferences for {}, continuing without: {}", device_id, e);
                (None, Vec::new())
            }
        },
        None => (None, Vec::new()),
    };
    let favorite_region = req.favorite_region.clone().or(stored_region);

    let restaurants = match load_restaurants(&state).await {
        Ok(restaurants) => restaurants,
        Err(e) => return upstream_error("restaurants", e),
    };

    let mut query = FilterQuery::new(req.filters, wall_clock_now(state.timezone))
        .search(&req.query)
        .favorite_region(favorite_region.as_deref());
    if req.nearby {
        query = query.nearby(req.observer);
        if query.proximity_observer().is_none() {
            tracing::debug!("Nearby requested without a usable observer location");
        }
    }

    let outcome = state.engine.apply(&restaurants, &query);
    let (favorites, results) = split_favorites(outcome.restaurants, &favorites, &restaurants);

    let per_page = req.per_page.unwrap_or(state.per_page).min(state.max_per_page);
    let page = paginate(results, req.page, per_page);

    tracing::info!(
        "Search {:?} returned {} of {} restaurants (page {}/{})",
        req.query,
        page.total_results,
        outcome.total_candidates,
        page.page,
        page.total_pages
    );

    HttpResponse::Ok().json(SearchRestaurantsResponse {
        restaurants: page.items,
        favorites,
        page: page.page,
        per_page: page.per_page,
        total_results: page.total_results,
        total_pages: page.total_pages,
    })
}

/// Get a single restaurant with its open status
///
/// GET /api/v1/restaurants/{code}
async fn get_restaurant(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let code = path.into_inner();
    let key = CacheKey::restaurant(code);

    let restaurant = match state.cache.get::<Restaurant>(&key).await {
        Ok(restaurant) => restaurant,
        Err(_) => match state.api.get_restaurant(code).await {
            Ok(restaurant) => {
                if let Err(e) = state.cache.set(&key, &restaurant).await {
                    tracing::warn!("Failed to cache restaurant {}: {}", code, e);
                }
                restaurant
            }
            Err(e) => return upstream_error("restaurant", e),
        },
    };

    let open_now = is_open_at(&restaurant, wall_clock_now(state.timezone));

    HttpResponse::Ok().json(RestaurantDetailResponse { restaurant, open_now })
}

/// Get a restaurant's menu
///
/// GET /api/v1/restaurants/{code}/menu?date=YYYY-MM-DD
///
/// Defaults to today when no date is given.
async fn get_menu(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<MenuQuery>,
) -> impl Responder {
    let code = path.into_inner();
    let date = query.date.unwrap_or_else(|| wall_clock_now(state.timezone).date());
    let key = CacheKey::menu(code, date);

    if let Ok(menu) = state.cache.get::<crate::models::Menu>(&key).await {
        return HttpResponse::Ok().json(menu);
    }

    match state.api.get_menu(code, date).await {
        Ok(menu) => {
            if let Err(e) = state.cache.set(&key, &menu).await {
                tracing::warn!("Failed to cache menu {}: {}", key, e);
            }
            HttpResponse::Ok().json(menu)
        }
        Err(e) => upstream_error("menu", e),
    }
}

/// List regions
///
/// GET /api/v1/regions
async fn list_regions(state: web::Data<AppState>) -> impl Responder {
    let key = CacheKey::regions();

    if let Ok(regions) = state.cache.get::<Vec<Region>>(&key).await {
        return HttpResponse::Ok().json(regions);
    }

    match state.api.list_regions().await {
        Ok(regions) => {
            if let Err(e) = state.cache.set(&key, &regions).await {
                tracing::warn!("Failed to cache regions: {}", e);
            }
            HttpResponse::Ok().json(regions)
        }
        Err(e) => upstream_error("regions", e),
    }
}

/// Toggle a filter
///
/// POST /api/v1/filters/toggle
///
/// Request body:
/// ```json
/// { "filters": { "nameAscending": true }, "filter": "reverseAlpha" }
/// ```
async fn toggle_filter(req: web::Json<ToggleFilterRequest>) -> impl Responder {
    let filters = req.filters.toggle(req.filter);
    HttpResponse::Ok().json(FilterStateResponse::from(filters))
}

/// Reset every filter
///
/// POST /api/v1/filters/reset
async fn reset_filters(req: web::Json<ResetFiltersRequest>) -> impl Responder {
    HttpResponse::Ok().json(FilterStateResponse::from(req.filters.reset()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use crate::core::FilterState;

    #[actix_web::test]
    async fn test_toggle_filter_endpoint() {
        let app = test::init_service(
            App::new()
                .route("/filters/toggle", web::post().to(toggle_filter))
                .route("/filters/reset", web::post().to(reset_filters)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/filters/toggle")
            .set_json(serde_json::json!({
                "filters": { "nameAscending": true, "cardPayment": true },
                "filter": "reverseAlpha"
            }))
            .to_request();
        let resp: FilterStateResponse = test::call_and_read_body_json(&app, req).await;

        assert!(resp.filters.name_descending);
        assert!(!resp.filters.name_ascending);
        assert!(resp.filters.card_payment);

        let req = test::TestRequest::post()
            .uri("/filters/reset")
            .set_json(serde_json::json!({ "filters": resp.filters }))
            .to_request();
        let resp: FilterStateResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.filters, FilterState::default());
        assert!(resp.active.is_empty());
    }

    #[::core::prelude::v1::test]
    fn test_upstream_error_status() {
        let resp = upstream_error("restaurant", CroustillantError::NotFound("restaurants/1".into()));
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        let resp = upstream_error("regions", CroustillantError::ApiError("503".into()));
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_GATEWAY);
    }
}
