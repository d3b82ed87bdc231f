use super::types::{request, response};
use crate::{modules::sheet::service as sheet, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate internal sheet query: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let spreadsheet_id =
        sheet::extract_spreadsheet_id(&payload.spread_sheet_url).map_err(response::Error::Sheet)?;

    sheet::get_internal_sheets(&ctx.google, &spreadsheet_id)
        .await
        .map(response::Success::InternalSheets)
        .map_err(response::Error::Sheet)
}
