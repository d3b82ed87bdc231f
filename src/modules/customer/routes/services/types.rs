pub mod request {
    pub use crate::modules::auth::middleware::Auth;
}

pub mod response {
    use crate::utils::envelope;
    use axum::{http::StatusCode, response::IntoResponse};
    use serde::Serialize;

    #[derive(Serialize)]
    pub struct Service {
        pub id: &'static str,
        pub name: &'static str,
        pub connected: bool,
    }

    pub enum Success {
        Services(Vec<Service>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Services(services) => {
                    envelope::success(StatusCode::OK, services, "Services fetched successfully.")
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchServices,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchServices => envelope::failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch services",
                ),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
