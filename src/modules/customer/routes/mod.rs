mod guilds;
mod services;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(services::get_router())
        .merge(guilds::get_router())
}
