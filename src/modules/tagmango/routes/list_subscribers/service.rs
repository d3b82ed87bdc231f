use super::types::{request, response};
use crate::{
    modules::tagmango::service::{auth, client},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.filters.validate().map_err(|errors| {
        tracing::warn!("Failed to validate subscriber filters: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let defaults = client::SubscribersQuery::default();
    let query = client::SubscribersQuery {
        page: payload.filters.page.unwrap_or(defaults.page),
        r#type: payload.filters.r#type.unwrap_or(defaults.r#type),
        page_size: payload.filters.page_size.unwrap_or(defaults.page_size),
        mangoes: payload.filters.mangoes,
        term: payload.filters.term,
    };

    auth::list_subscribers(&ctx.tagmango, ctx.credentials.as_ref(), &payload.customer_id, &query)
        .await
        .map(response::Success::Subscribers)
        .map_err(response::Error::TagMango)
}
