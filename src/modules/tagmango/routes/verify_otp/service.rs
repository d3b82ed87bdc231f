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

    auth::verify_otp(
        &ctx.tagmango,
        ctx.credentials.as_ref(),
        client::VerifyOtpPayload {
            phone: payload.body.phone,
            otp: payload.body.otp,
            user_agent: user_agent_or_default(payload.user_agent),
        },
        &payload.customer_id,
    )
    .await
    .map(response::Success::OtpVerified)
    .map_err(response::Error::TagMango)
}
