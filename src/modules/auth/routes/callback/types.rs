pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Params {
        #[validate(length(min = 1, code = "INVALID_CODE", message = "Missing authorization code"))]
        pub code: String,
        #[validate(length(min = 1, code = "INVALID_STATE", message = "Missing state"))]
        pub state: String,
    }
}

pub mod response {
    use crate::{
        modules::customer::repository::Customer,
        utils::{envelope, validation},
    };
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        SignedIn {
            customer: Customer,
            access_token: String,
            refresh_token: String,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedIn {
                    customer,
                    access_token,
                    refresh_token,
                } => envelope::success(
                    StatusCode::OK,
                    json!({
                        "customer": customer,
                        "access_token": access_token,
                        "refresh_token": refresh_token,
                    }),
                    "Signed in successfully.",
                ),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidState,
        FailedToExchangeCode,
        FailedToFetchDiscordUser,
        FailedToSaveCustomer,
        FailedToCreateSession,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::InvalidState => {
                    envelope::failure(StatusCode::BAD_REQUEST, "Invalid OAuth state")
                }
                Self::FailedToExchangeCode => envelope::failure(
                    StatusCode::BAD_GATEWAY,
                    "Failed to exchange authorization code",
                ),
                Self::FailedToFetchDiscordUser => {
                    envelope::failure(StatusCode::BAD_GATEWAY, "Failed to fetch Discord user")
                }
                Self::FailedToSaveCustomer => envelope::failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to save customer",
                ),
                Self::FailedToCreateSession => envelope::failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to create session",
                ),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
