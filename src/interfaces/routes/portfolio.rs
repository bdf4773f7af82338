use actix_web::web;

use crate::handlers::portfolio;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/portfolio")
            .service(portfolio::add_project)
            .service(portfolio::search_projects)
            .service(portfolio::get_projects_by_freelancer)
    );
}
