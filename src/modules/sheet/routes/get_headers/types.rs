pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        #[validate(length(min = 1, code = "INVALID_SPREADSHEET_URL", message = "Spreadsheet url is required"))]
        pub spread_sheet_url: String,
        #[validate(length(min = 1, code = "INVALID_SHEET_NAME", message = "Sheet name is required"))]
        pub sheet_name: String,
        #[validate(range(min = 1, code = "INVALID_HEADER_ROW", message = "Header row starts at 1"))]
        pub header_row: u32,
    }
}

pub mod response {
    use crate::{
        modules::sheet::{routes::into_failure, service},
        utils::{envelope, validation},
    };
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::Value;
    use validator::ValidationErrors;

    pub enum Success {
        Headers(Vec<Value>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Headers(headers) => {
                    envelope::success(StatusCode::OK, headers, "Sheet headers fetched successfully.")
                }
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        Sheet(service::Error),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors).into_response(),
                Self::Sheet(err) => into_failure(err),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
