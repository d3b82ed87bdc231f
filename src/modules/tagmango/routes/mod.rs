mod list_mangoes;
mod list_subscribers;
mod refresh_credential;
mod send_otp;
mod verify_otp;

use crate::{modules::tagmango::service::{auth, client}, types::Context, utils::envelope};
use axum::{http::StatusCode, response::Response, routing::Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(send_otp::get_router())
        .merge(verify_otp::get_router())
        .nest(
            "/tagmango",
            Router::new()
                .merge(refresh_credential::get_router())
                .merge(list_subscribers::get_router())
                .merge(list_mangoes::get_router()),
        )
}

fn user_agent_or_default(user_agent: Option<String>) -> String {
    user_agent.unwrap_or_else(|| String::from("unknown"))
}

/// Shared rendering of TagMango failures for every route in this module.
fn into_failure(err: auth::Error) -> Response {
    match err {
        auth::Error::Client(client::Error::Api(payload)) => envelope::failure_with_data(
            StatusCode::BAD_GATEWAY,
            payload,
            "TagMango rejected the request",
        ),
        auth::Error::Client(client::Error::ContractViolation(_)) | auth::Error::TokenMissing => {
            envelope::failure(StatusCode::BAD_GATEWAY, "Unexpected response from TagMango")
        }
        auth::Error::Client(client::Error::RequestNotSent)
        | auth::Error::Client(client::Error::FailedToDecodeResponse) => {
            envelope::failure(StatusCode::BAD_GATEWAY, "TagMango is unavailable")
        }
        auth::Error::Client(client::Error::MissingCredential) | auth::Error::MissingCredential => {
            envelope::failure(StatusCode::NOT_FOUND, "TagMango account not connected")
        }
        auth::Error::Persistence => envelope::failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to save TagMango credential",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn render(err: auth::Error) -> (StatusCode, serde_json::Value) {
        envelope::read(into_failure(err)).await
    }

    #[tokio::test]
    async fn provider_rejection_is_bad_gateway_with_raw_payload() {
        let rejection = json!({ "code": 1, "type": "ERROR", "message": "OTP expired" });
        let (status, body) = render(auth::Error::Client(client::Error::Api(rejection.clone()))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({
                "success": false,
                "data": rejection,
                "message": "TagMango rejected the request",
            })
        );
    }

    #[tokio::test]
    async fn malformed_provider_results_are_bad_gateway() {
        for err in [
            auth::Error::TokenMissing,
            auth::Error::Client(client::Error::ContractViolation("accessToken".to_string())),
        ] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(body["message"], "Unexpected response from TagMango");
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn transport_failures_are_bad_gateway() {
        for err in [
            auth::Error::Client(client::Error::RequestNotSent),
            auth::Error::Client(client::Error::FailedToDecodeResponse),
        ] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(body["message"], "TagMango is unavailable");
        }
    }

    #[tokio::test]
    async fn missing_credential_is_not_found() {
        for err in [
            auth::Error::MissingCredential,
            auth::Error::Client(client::Error::MissingCredential),
        ] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["message"], "TagMango account not connected");
        }
    }

    #[tokio::test]
    async fn persistence_failure_is_internal_error() {
        let (status, body) = render(auth::Error::Persistence).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to save TagMango credential");
    }

    #[test]
    fn missing_user_agent_falls_back() {
        assert_eq!(user_agent_or_default(None), "unknown");
        assert_eq!(user_agent_or_default(Some("curl/8.4".to_string())), "curl/8.4");
    }
}
