use super::types::{request, response};
use crate::{modules::sheet::service as sheet, types::Context};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;

const DISCORD_ID_HEADER: &str = "discord_id";

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate sheet header query: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let spreadsheet_id =
        sheet::extract_spreadsheet_id(&payload.spread_sheet_url).map_err(response::Error::Sheet)?;

    let (phone_number_header, email_header, discord_id_header) = futures::try_join!(
        sheet::get_cell(&ctx.google, &spreadsheet_id, &payload.sheet_name, &payload.phone_cell),
        sheet::get_cell(&ctx.google, &spreadsheet_id, &payload.sheet_name, &payload.email_cell),
        sheet::edit_cell(
            &ctx.google,
            &spreadsheet_id,
            &payload.sheet_name,
            &payload.discord_id_cell,
            Value::from(DISCORD_ID_HEADER),
        ),
    )
    .map_err(response::Error::Sheet)?;

    Ok(response::Success::Headers(response::Headers {
        phone_number_header,
        email_header,
        discord_id_header,
    }))
}
