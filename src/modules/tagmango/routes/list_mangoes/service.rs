use super::types::response;
use crate::{modules::tagmango::service::auth, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, customer_id: String) -> response::Response {
    auth::list_active_mangoes(&ctx.tagmango, ctx.credentials.as_ref(), &customer_id)
        .await
        .map(response::Success::Mangoes)
        .map_err(response::Error::TagMango)
}
