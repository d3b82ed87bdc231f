mod callback;
mod get_oauth_link;
mod login;
mod refresh;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(login::get_router())
        .merge(get_oauth_link::get_router())
        .merge(callback::get_router())
        .nest("/auth", refresh::get_router())
}
