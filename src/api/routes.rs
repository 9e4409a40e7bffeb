// API route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api")
                .route("/categories", web::get().to(handlers::list_categories))
                .route("/products", web::get().to(handlers::list_products)),
        );
}
