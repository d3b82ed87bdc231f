use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::extract::{Query, State};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Query(payload): Query<request::Payload>,
) -> response::Response {
    service(ctx, payload).await
}
