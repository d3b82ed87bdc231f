use super::{
    service::service,
    types::{request, response},
};
use crate::types::Context;
use axum::{extract::State, Json};
use axum_extra::{headers::UserAgent, TypedHeader};
use std::sync::Arc;

pub async fn handler(
    _: request::Auth,
    State(ctx): State<Arc<Context>>,
    user_agent: Option<TypedHeader<UserAgent>>,
    Json(body): Json<request::Body>,
) -> response::Response {
    service(
        ctx,
        request::Payload {
            body,
            user_agent: user_agent.map(|TypedHeader(ua)| ua.to_string()),
        },
    )
    .await
}
