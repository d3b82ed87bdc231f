use super::service::auth;
use crate::modules::customer::repository::Customer;
use crate::types::Context;
use crate::utils::envelope;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::response::Response;
use axum::RequestPartsExt;
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

fn rejection(err: auth::Error) -> Response {
    tracing::debug!("Rejected session token: {:?}", err);
    match err {
        auth::Error::ExpiredToken => envelope::failure(StatusCode::UNAUTHORIZED, "Session token expired"),
        auth::Error::UnknownToken => envelope::failure(StatusCode::UNAUTHORIZED, "Invalid session token"),
        auth::Error::Database => envelope::failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to verify session token",
        ),
    }
}

/// Customer behind the `Authorization: Bearer <session token>` header.
#[derive(Clone)]
pub struct Auth {
    pub customer: Customer,
}

#[async_trait]
impl FromRequestParts<Arc<Context>> for Auth {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<Context>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| rejection(auth::Error::UnknownToken))?;

        auth::verify_access_token(ctx, bearer.token())
            .await
            .map(|customer| Self { customer })
            .map_err(rejection)
    }
}
