// Route exports
pub mod schools;

use actix_web::web;

pub use schools::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(schools::configure),
    );
}
