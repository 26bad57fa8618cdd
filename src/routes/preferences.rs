use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use uuid::Uuid;
use crate::models::{AddFavoriteRequest, ErrorResponse, FavoriteRestaurant, SetRegionRequest, UpdateSettingsRequest};
use crate::routes::restaurants::AppState;
use crate::services::PreferenceError;

/// Configure device preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/preferences/{device_id}", web::get().to(get_preferences))
        .route("/preferences/{device_id}/region", web::put().to(set_region))
        .route("/preferences/{device_id}/settings", web::put().to(update_settings))
        .route("/preferences/{device_id}/favorites", web::post().to(add_favorite))
        .route("/preferences/{device_id}/favorites", web::delete().to(clear_favorites))
        .route("/preferences/{device_id}/favorites/{restaurant_id}", web::get().to(check_favorite))
        .route("/preferences/{device_id}/favorites/{restaurant_id}", web::delete().to(remove_favorite));
}

fn store_error(context: &str, err: PreferenceError) -> HttpResponse {
    match err {
        PreferenceError::InvalidInput(message) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("Invalid input", message, 400))
        }
        other => {
            tracing::error!("Preference store failure ({}): {}", context, other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                format!("Failed to {}", context),
                other.to_string(),
                500,
            ))
        }
    }
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors.to_string(), 400))
}

/// Get preferences for a device
///
/// GET /api/v1/preferences/{deviceId}
async fn get_preferences(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let device_id = path.into_inner();

    match state.preferences.get_preferences(device_id).await {
        Ok(prefs) => HttpResponse::Ok().json(prefs),
        Err(e) => store_error("load preferences", e),
    }
}

/// Set the favorite region
///
/// PUT /api/v1/preferences/{deviceId}/region
///
/// Request body:
/// ```json
/// { "region": "all" }
/// ```
async fn set_region(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SetRegionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    let device_id = path.into_inner();

    match state.preferences.set_favorite_region(device_id, &req.region).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error("set favorite region", e),
    }
}

/// Update language and/or theme
///
/// PUT /api/v1/preferences/{deviceId}/settings
async fn update_settings(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSettingsRequest>,
) -> impl Responder {
    let device_id = path.into_inner();

    if let Some(language) = req.language {
        if let Err(e) = state.preferences.set_language(device_id, language).await {
            return store_error("set language", e);
        }
    }
    if let Some(theme) = req.theme {
        if let Err(e) = state.preferences.set_theme(device_id, theme).await {
            return store_error("set theme", e);
        }
    }

    HttpResponse::NoContent().finish()
}

/// Save a favorite restaurant
///
/// POST /api/v1/preferences/{deviceId}/favorites
///
/// Request body:
/// ```json
/// { "id": "1234", "name": "RU Lettres", "city": "Nancy" }
/// ```
async fn add_favorite(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<AddFavoriteRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }
    let device_id = path.into_inner();
    let req = req.into_inner();
    let favorite = FavoriteRestaurant {
        id: req.id,
        name: req.name,
        city: req.city,
    };

    match state.preferences.add_favorite(device_id, &favorite).await {
        Ok(()) => HttpResponse::Created().json(favorite),
        Err(e) => store_error("add favorite", e),
    }
}

/// Whether a restaurant is saved as a favorite
///
/// GET /api/v1/preferences/{deviceId}/favorites/{restaurantId}
async fn check_favorite(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> impl Responder {
    let (device_id, restaurant_id) = path.into_inner();

    match state.preferences.is_favorite(device_id, &restaurant_id).await {
        Ok(favorite) => HttpResponse::Ok().json(serde_json::json!({ "favorite": favorite })),
        Err(e) => store_error("check favorite", e),
    }
}

/// Remove one favorite
///
/// DELETE /api/v1/preferences/{deviceId}/favorites/{restaurantId}
async fn remove_favorite(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> impl Responder {
    let (device_id, restaurant_id) = path.into_inner();

    match state.preferences.remove_favorite(device_id, &restaurant_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Not found",
            format!("Restaurant {} is not a favorite", restaurant_id),
            404,
        )),
        Err(e) => store_error("remove favorite", e),
    }
}

/// Clear favorites and the favorite region
///
/// DELETE /api/v1/preferences/{deviceId}/favorites
async fn clear_favorites(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let device_id = path.into_inner();

    match state.preferences.clear_favorites(device_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error("clear favorites", e),
    }
}
