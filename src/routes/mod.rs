// Route exports
pub mod preferences;
pub mod restaurants;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(restaurants::configure)
            .configure(preferences::configure),
    );
}
