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
        #[validate(range(max = 999_999, code = "INVALID_OTP", message = "Invalid OTP"))]
        pub otp: u32,
    }

    pub struct Payload {
        pub customer_id: String,
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
    use validator::ValidationErrors;

    pub enum Success {
        OtpVerified(bool),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OtpVerified(verified) => {
                    envelope::success(StatusCode::OK, verified, "OTP verified successfully.")
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
