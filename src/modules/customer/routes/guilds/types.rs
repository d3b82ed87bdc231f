pub mod request {
    pub use crate::modules::auth::middleware::Auth;
}

pub mod response {
    use crate::{modules::discord::service::Guild, utils::envelope};
    use axum::{http::StatusCode, response::IntoResponse};

    pub enum Success {
        Guilds(Vec<Guild>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Guilds(guilds) => {
                    envelope::success(StatusCode::OK, guilds, "Guilds fetched successfully.")
                }
            }
        }
    }

    pub enum Error {
        FailedToFetchGuilds,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchGuilds => {
                    envelope::failure(StatusCode::BAD_GATEWAY, "Failed to fetch Discord guilds")
                }
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
