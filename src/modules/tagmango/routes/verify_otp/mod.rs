mod handler;
mod service;
mod types;

use crate::types::Context;
use axum::routing::{post, Router};
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().route("/verify-otp", post(handler::handler))
}

#[cfg(test)]
mod tests {
    use super::{service::service, types::request};
    use crate::{types::Context, utils::envelope};
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CUSTOMER_ID: &str = "01J6Z3Q8WJ4K2M9N0P1R2S3T4V";

    fn payload() -> request::Payload {
        request::Payload {
            customer_id: CUSTOMER_ID.to_string(),
            body: request::Body {
                phone: 9999999999,
                otp: 123456,
            },
            user_agent: Some("Mozilla/5.0".to_string()),
        }
    }

    #[tokio::test]
    async fn rejected_verification_is_not_ok_and_carries_raw_payload() {
        let server = MockServer::start().await;
        let rejection = json!({ "code": 1, "type": "ERROR" });

        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rejection.clone()))
            .mount(&server)
            .await;

        let ctx = Arc::new(Context::for_tests(&server.uri()));
        let (status, body) =
            envelope::read(service(ctx.clone(), payload()).await.into_response()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], rejection);
        assert!(ctx
            .credentials
            .find_by_customer_id(CUSTOMER_ID)
            .await
            .expect("store lookup")
            .is_none());
    }

    #[tokio::test]
    async fn verified_otp_responds_true_without_exposing_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/verify-otp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 0,
                "result": { "accessToken": "access-1", "refreshToken": "refresh-1" }
            })))
            .mount(&server)
            .await;

        let ctx = Arc::new(Context::for_tests(&server.uri()));
        let (status, body) =
            envelope::read(service(ctx.clone(), payload()).await.into_response()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "data": true, "message": "OTP verified successfully." })
        );
        let credential = ctx
            .credentials
            .find_by_customer_id(CUSTOMER_ID)
            .await
            .expect("store lookup")
            .expect("stored credential");
        assert_eq!(credential.access_token, "access-1");
    }
}
