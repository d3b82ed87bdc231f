use super::types::{request, response};
use crate::{
    modules::{auth::service, customer, discord},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, params: request::Params) -> response::Response {
    params.validate().map_err(|errors| {
        tracing::warn!("Failed to validate OAuth callback: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    service::state::verify(&ctx.session.secret, &params.state).map_err(|err| {
        tracing::warn!("Rejected OAuth state: {:?}", err);
        response::Error::InvalidState
    })?;

    let tokens = discord::service::exchange_grant_code_for_tokens(&ctx.discord, &params.code)
        .await
        .map_err(|_| response::Error::FailedToExchangeCode)?;

    let user = discord::service::fetch_current_user(&ctx.discord, &tokens.access_token)
        .await
        .map_err(|_| response::Error::FailedToFetchDiscordUser)?;

    let customer = customer::repository::upsert_by_discord_id(
        &ctx.db_conn.pool,
        customer::repository::UpsertCustomerPayload {
            discord_id: user.id,
            username: user.username,
            email: user.email,
            discord_access_token: tokens.access_token,
            discord_refresh_token: tokens.refresh_token,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToSaveCustomer)?;

    let session = service::auth::create_session(&ctx, &customer.id)
        .await
        .map_err(|_| response::Error::FailedToCreateSession)?;

    tracing::info!("Customer {} signed in with Discord", customer.id);

    Ok(response::Success::SignedIn {
        customer,
        access_token: session.access_token,
        refresh_token: session.refresh_token,
    })
}
