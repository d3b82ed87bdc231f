use super::types::{request, response};
use crate::{modules::sheet::service as sheet, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate sheet header row query: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let spreadsheet_id =
        sheet::extract_spreadsheet_id(&payload.spread_sheet_url).map_err(response::Error::Sheet)?;

    let range = sheet::get_column_data(
        &ctx.google,
        &spreadsheet_id,
        &payload.sheet_name,
        payload.header_row,
    )
    .await
    .map_err(response::Error::Sheet)?;

    sheet::header_row(range)
        .map(response::Success::Headers)
        .map_err(response::Error::Sheet)
}
