pub mod request {
    pub use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct Filters {
        #[validate(range(min = 1, code = "INVALID_PAGE", message = "Page starts at 1"))]
        pub page: Option<u32>,
        #[serde(rename = "type")]
        pub r#type: Option<String>,
        #[validate(range(min = 1, max = 100, code = "INVALID_PAGE_SIZE", message = "Page size must be between 1 and 100"))]
        pub page_size: Option<u32>,
        pub mangoes: Option<String>,
        pub term: Option<String>,
    }

    pub struct Payload {
        pub customer_id: String,
        pub filters: Filters,
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
        Subscribers(Value),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Subscribers(result) => {
                    envelope::success(StatusCode::OK, result, "Subscribers fetched successfully.")
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
