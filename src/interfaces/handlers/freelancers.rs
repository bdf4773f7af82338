use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::freelancer::RegisterFreelancerRequest, errors::AppError, AppState};

#[post("/register")]
#[instrument(skip(state, data))]
pub async fn register(
    state: web::Data<AppState>,
    data: web::Json<RegisterFreelancerRequest>,
) -> Result<impl Responder, AppError> {
    let freelancer = state
        .freelancer_handler
        .register(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(freelancer))
}

#[get("/freelancers/{id}")]
#[instrument(skip(state))]
pub async fn get_freelancer(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let freelancer = state
        .freelancer_handler
        .get_freelancer(id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(freelancer))
}
