use super::types::response;
use crate::{
    modules::{auth::service, discord},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    let state = service::state::generate(&ctx.session.secret);
    response::Success::OauthLink(discord::service::generate_oauth_link(&ctx.discord, &state))
}
