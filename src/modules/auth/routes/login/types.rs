pub mod response {
    use axum::response::{IntoResponse, Redirect};

    pub enum Success {
        RedirectToDiscord(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::RedirectToDiscord(url) => Redirect::to(&url).into_response(),
            }
        }
    }

    pub type Response = Success;
}
