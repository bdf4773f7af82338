use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod extractor_errors;
mod freelancers;
mod portfolio;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(freelancers::config_routes)
            .configure(portfolio::config_routes)
    );

    cfg.configure(extractor_errors::config_routes);
}
