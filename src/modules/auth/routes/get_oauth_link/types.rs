pub mod response {
    use crate::utils::envelope;
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        OauthLink(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OauthLink(url) => envelope::success(
                    StatusCode::OK,
                    json!({ "url": url }),
                    "OAuth link generated successfully.",
                ),
            }
        }
    }

    pub type Response = Success;
}
