pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Body {
        #[validate(range(
            min = 1_000_000_000_u64,
            max = 999_999_999_999_999_u64,
            code = "INVALID_PHONE_NUMBER",
            message = "Phone number must have between 10 and 15 digits"
        ))]
        pub phone: u64,
    }

    pub struct Payload {
        pub body: Body,
        pub user_agent: Option<String>,
    }
}

pub mod response {
    use crate::{
        modules::tagmango::{routes::into_failure, service::auth},
        utils::{envelope, validation},
    };
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::Value;
    use validator::ValidationErrors;

    pub enum Success {
        OtpSent(Value),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OtpSent(result) => {
                    envelope::success(StatusCode::OK, result, "OTP sent successfully.")
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        TagMango(auth::Error),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::TagMango(err) => into_failure(err),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
