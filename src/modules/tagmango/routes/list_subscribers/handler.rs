use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::extract::{Query, State};
use std::sync::Arc;

pub async fn handler(
    auth: request::Auth,
    State(ctx): State<Arc<Context>>,
    Query(filters): Query<request::Filters>,
) -> response::Response {
    service(
        ctx,
        request::Payload {
            customer_id: auth.customer.id,
            filters,
        },
    )
    .await
}
