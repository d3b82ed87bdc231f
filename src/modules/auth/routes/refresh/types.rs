pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub token: String,
    }
}

pub mod response {
    use crate::utils::envelope;
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Tokens((String, String)),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Tokens((access_token, refresh_token)) => envelope::success(
                    StatusCode::OK,
                    json!({
                        "access_token": access_token,
                        "refresh_token": refresh_token,
                    }),
                    "Session refreshed successfully.",
                ),
            }
        }
    }

    pub enum Error {
        InvalidRefreshToken,
        ExpiredRefreshToken,
        FailedToRefreshTokens,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidRefreshToken => {
                    envelope::failure(StatusCode::UNAUTHORIZED, "Invalid refresh token")
                }
                Self::ExpiredRefreshToken => {
                    envelope::failure(StatusCode::UNAUTHORIZED, "Refresh token expired")
                }
                Self::FailedToRefreshTokens => envelope::failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to refresh tokens",
                ),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
