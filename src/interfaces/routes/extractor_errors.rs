use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web,
};

use crate::errors::AppError;

/// Rejected bodies, query strings and path segments all answer 400 with
/// the usual `{"error", "message"}` body.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));

    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));

    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        AppError::BadRequest(format!("JSON payload error: {}", err))
    }
}

impl From<QueryPayloadError> for AppError {
    fn from(err: QueryPayloadError) -> Self {
        AppError::BadRequest(format!("Query error: {}", err))
    }
}

impl From<PathError> for AppError {
    fn from(err: PathError) -> Self {
        AppError::BadRequest(format!("Path error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn echo_id(id: web::Path<i64>) -> HttpResponse {
        HttpResponse::Ok().body(id.to_string())
    }

    #[actix_rt::test]
    async fn non_numeric_path_segment_is_a_bad_request() {
        let app = test::init_service(
            App::new()
                .configure(config_routes)
                .route("/items/{id}", web::get().to(echo_id)),
        )
        .await;

        let req = test::TestRequest::get().uri("/items/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Bad request");
        assert!(body["message"].as_str().unwrap().starts_with("Path error"));
    }
}
