use super::{service::service, types::response};
use crate::types::Context;
use axum::extract::State;
use std::sync::Arc;

pub async fn handler(State(ctx): State<Arc<Context>>) -> response::Response {
    service(ctx).await
}
