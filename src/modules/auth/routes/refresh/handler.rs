use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<request::Payload>,
) -> response::Response {
    service(ctx, payload).await
}
