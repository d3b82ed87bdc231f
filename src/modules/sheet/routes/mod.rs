mod get_headers;
mod internal_sheets;
mod validate_headers;

use crate::{modules::sheet::service, types::Context, utils::envelope};
use axum::{http::StatusCode, response::Response, routing::Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().nest(
        "/sheets",
        Router::new()
            .merge(internal_sheets::get_router())
            .merge(validate_headers::get_router())
            .merge(get_headers::get_router()),
    )
}

fn into_failure(err: service::Error) -> Response {
    match err {
        service::Error::InvalidInput(message) => envelope::failure(StatusCode::BAD_REQUEST, message),
        service::Error::NotFound(message) => envelope::failure(StatusCode::NOT_FOUND, message),
        service::Error::Auth(_) => envelope::failure(
            StatusCode::BAD_GATEWAY,
            "Failed to authenticate with Google Sheets",
        ),
        service::Error::RequestNotSent
        | service::Error::UnexpectedStatus(_)
        | service::Error::FailedToDecodeResponse => {
            envelope::failure(StatusCode::BAD_GATEWAY, "Google Sheets is unavailable")
        }
    }
}
