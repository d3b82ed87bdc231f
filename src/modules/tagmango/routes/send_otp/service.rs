use super::types::{request, response};
use crate::{
    modules::tagmango::{routes::user_agent_or_default, service::{auth, client}},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    auth::request_otp(
        &ctx.tagmango,
        client::GetOtpPayload {
            phone: payload.body.phone,
            user_agent: user_agent_or_default(payload.user_agent),
        },
    )
    .await
    .map(response::Success::OtpSent)
    .map_err(response::Error::TagMango)
}
