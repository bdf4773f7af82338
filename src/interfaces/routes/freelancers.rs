use actix_web::web;

use crate::handlers::freelancers;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(freelancers::register)
        .service(freelancers::get_freelancer);
}
