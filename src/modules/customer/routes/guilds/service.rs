use super::types::response;
use crate::{
    modules::{customer::repository::Customer, discord},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, customer: Customer) -> response::Response {
    discord::service::fetch_current_user_guilds(&ctx.discord, &customer.discord_access_token)
        .await
        .map(response::Success::Guilds)
        .map_err(|err| {
            tracing::error!("Failed to fetch guilds for customer {}: {:?}", customer.id, err);
            response::Error::FailedToFetchGuilds
        })
}
