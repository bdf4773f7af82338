use actix_web::{get, post, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{AddProjectParams, NewProjectRequest, SearchParams},
    errors::AppError,
    AppState,
};

#[post("/add")]
#[instrument(skip(state, data))]
pub async fn add_project(
    state: web::Data<AppState>,
    params: web::Query<AddProjectParams>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .portfolio_handler
        .add_project(params.freelancer_id, data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(project))
}

#[get("/search")]
#[instrument(skip(state))]
pub async fn search_projects(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> Result<impl Responder, AppError> {
    let SearchParams { query, page, size } = params.into_inner();

    let projects = state
        .portfolio_handler
        .search_projects_paginated(&query, page, size)
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[get("/freelancer/{freelancer_id}")]
#[instrument(skip(state))]
pub async fn get_projects_by_freelancer(
    state: web::Data<AppState>,
    freelancer_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let projects = state
        .portfolio_handler
        .get_projects_by_freelancer(freelancer_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}
