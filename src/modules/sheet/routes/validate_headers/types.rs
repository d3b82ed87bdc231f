pub mod request {
    use regex::Regex;
    use serde::Deserialize;
    use std::borrow::Cow;
    use validator::{Validate, ValidationError};

    fn validate_cell(cell: &str) -> Result<(), ValidationError> {
        let regex = Regex::new(r"^[A-Za-z]{1,3}[1-9][0-9]*$").expect("Invalid cell regex");
        match regex.is_match(cell) {
            true => Ok(()),
            false => Err(ValidationError::new("INVALID_CELL")
                .with_message(Cow::from("Cell must be an A1 reference (e.g: B2)"))),
        }
    }

    #[derive(Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        #[validate(length(min = 1, code = "INVALID_SPREADSHEET_URL", message = "Spreadsheet url is required"))]
        pub spread_sheet_url: String,
        #[validate(length(min = 1, code = "INVALID_SHEET_NAME", message = "Sheet name is required"))]
        pub sheet_name: String,
        #[validate(custom(function = "validate_cell"))]
        pub phone_cell: String,
        #[validate(custom(function = "validate_cell"))]
        pub email_cell: String,
        #[validate(custom(function = "validate_cell"))]
        pub discord_id_cell: String,
    }

}

pub mod response {
    use crate::{
        modules::sheet::{routes::into_failure, service},
        utils::{envelope, validation},
    };
    use axum::{http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::Value;
    use validator::ValidationErrors;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Headers {
        pub phone_number_header: Option<Value>,
        pub email_header: Option<Value>,
        pub discord_id_header: Option<Value>,
    }

    pub enum Success {
        Headers(Headers),
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
