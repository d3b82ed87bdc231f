use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use super::{auth, customer, sheet, tagmango};
use crate::types::Context;
use std::sync::Arc;

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "message": "Welcome to MemberBridge API" })),
    )
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(health_check))
        .merge(auth::routes::get_router())
        .merge(customer::routes::get_router())
        .merge(tagmango::routes::get_router())
        .merge(sheet::routes::get_router())
}
