pub mod request {
    pub use crate::modules::auth::middleware::Auth;
}

pub mod response {
    use crate::{
        modules::tagmango::{routes::into_failure, service::auth},
        utils::envelope,
    };
    use axum::{http::StatusCode, response::IntoResponse};
    use serde_json::Value;

    pub enum Success {
        Mangoes(Value),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Mangoes(result) => {
                    envelope::success(StatusCode::OK, result, "Active mangoes fetched successfully.")
                }
            }
        }
    }

    pub enum Error {
        TagMango(auth::Error),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TagMango(err) => into_failure(err),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
