use super::types::{request, response};
use crate::{modules::auth::service::auth, types::Context};
use std::sync::Arc;

fn into_failure(err: auth::Error) -> response::Error {
    match err {
        auth::Error::Database => response::Error::FailedToRefreshTokens,
        auth::Error::ExpiredToken => response::Error::ExpiredRefreshToken,
        auth::Error::UnknownToken => response::Error::InvalidRefreshToken,
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    auth::rotate_session(&ctx, &payload.token)
        .await
        .map_err(into_failure)
        .map(|session| response::Success::Tokens((session.access_token, session.refresh_token)))
}
