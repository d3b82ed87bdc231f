use super::types::response;
use crate::types::Context;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, customer_id: String) -> response::Response {
    let credential = ctx
        .credentials
        .find_by_customer_id(&customer_id)
        .await
        .map_err(|err| {
            tracing::error!("Failed to look up TagMango credential: {:?}", err);
            response::Error::FailedToFetchServices
        })?;

    Ok(response::Success::Services(vec![
        response::Service {
            id: "discord",
            name: "Discord",
            connected: true,
        },
        response::Service {
            id: "tagmango",
            name: "TagMango",
            connected: credential.is_some(),
        },
        response::Service {
            id: "google_sheets",
            name: "Google Sheets",
            connected: true,
        },
    ]))
}
