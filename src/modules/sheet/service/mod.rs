pub mod google_auth;

use crate::types::GoogleContext;
use axum::http::Method;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug)]
pub enum Error {
    InvalidInput(&'static str),
    NotFound(&'static str),
    Auth(google_auth::Error),
    RequestNotSent,
    UnexpectedStatus(u16),
    FailedToDecodeResponse,
}

type Result<T> = std::result::Result<T, Error>;

pub fn extract_spreadsheet_id(url: &str) -> Result<String> {
    let regex =
        Regex::new(r"/spreadsheets/d/([a-zA-Z0-9-_]+)").expect("Invalid spreadsheet url regex");

    regex
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or(Error::InvalidInput("No sheet found"))
}

/// Tab properties as Google reports them; any of them may be absent on a tab.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternalSheet {
    #[serde(default)]
    pub sheet_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub index: Option<i64>,
}

#[derive(Deserialize)]
struct SpreadsheetSheets {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    #[serde(default)]
    properties: InternalSheet,
}

pub async fn get_internal_sheets(ctx: &GoogleContext, spreadsheet_id: &str) -> Result<Vec<InternalSheet>> {
    let url = format!(
        "{}/v4/spreadsheets/{}?fields=sheets.properties",
        ctx.sheets_api_endpoint, spreadsheet_id
    );

    let spreadsheet = send_sheets_request::<SpreadsheetSheets>(ctx, Method::GET, url, None).await?;
    if spreadsheet.sheets.is_empty() {
        return Err(Error::NotFound("No sheet found"));
    }

    Ok(spreadsheet
        .sheets
        .into_iter()
        .map(|entry| entry.properties)
        .collect())
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    fn first_value(self) -> Option<Value> {
        self.values
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    updated_data: Option<ValueRange>,
}

pub async fn get_cell(
    ctx: &GoogleContext,
    spreadsheet_id: &str,
    sheet_name: &str,
    cell: &str,
) -> Result<Option<Value>> {
    let url = values_url(ctx, spreadsheet_id, &a1_range(sheet_name, cell));
    let range = send_sheets_request::<ValueRange>(ctx, Method::GET, url, None).await?;

    Ok(range.first_value())
}

/// Overwrites a single cell and returns the value Google reports as stored.
pub async fn edit_cell(
    ctx: &GoogleContext,
    spreadsheet_id: &str,
    sheet_name: &str,
    cell: &str,
    value: Value,
) -> Result<Option<Value>> {
    let range = a1_range(sheet_name, cell);
    let url = format!(
        "{}?valueInputOption=RAW&includeValuesInResponse=true",
        values_url(ctx, spreadsheet_id, &range)
    );
    let body = json!({
        "range": range,
        "majorDimension": "ROWS",
        "values": [[value]],
    });

    let res = send_sheets_request::<UpdateValuesResponse>(ctx, Method::PUT, url, Some(body)).await?;

    Ok(res.updated_data.and_then(ValueRange::first_value))
}

pub async fn get_column_data(
    ctx: &GoogleContext,
    spreadsheet_id: &str,
    sheet_name: &str,
    row: u32,
) -> Result<ValueRange> {
    let row = row.to_string();
    let url = values_url(ctx, spreadsheet_id, &a1_range(sheet_name, &format!("{row}:{row}")));

    send_sheets_request(ctx, Method::GET, url, None).await
}

/// The single non-empty row of a header fetch.
pub fn header_row(range: ValueRange) -> Result<Vec<Value>> {
    let mut rows = range.values.into_iter();
    match (rows.next(), rows.next()) {
        (Some(row), None) if !row.is_empty() => Ok(row),
        _ => Err(Error::InvalidInput("Invalid Row")),
    }
}

/// `'{sheet}'!{cells}`, with quotes inside the sheet name doubled.
fn a1_range(sheet_name: &str, cells: &str) -> String {
    format!("'{}'!{}", sheet_name.replace('\'', "''"), cells)
}

fn values_url(ctx: &GoogleContext, spreadsheet_id: &str, range: &str) -> String {
    format!(
        "{}/v4/spreadsheets/{}/values/{}",
        ctx.sheets_api_endpoint,
        spreadsheet_id,
        urlencoding::encode(range)
    )
}

async fn send_sheets_request<R: DeserializeOwned>(
    ctx: &GoogleContext,
    method: Method,
    url: String,
    body: Option<Value>,
) -> Result<R> {
    let token = ctx.auth.access_token().await.map_err(Error::Auth)?;

    let mut req = ctx.http.request(method, &url).bearer_auth(token);
    if let Some(body) = body {
        req = req.json(&body);
    }

    let res = req.send().await.map_err(|err| {
        tracing::error!("Failed to send Google Sheets request to {}: {}", url, err);
        Error::RequestNotSent
    })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Failed to get text of Google Sheets response: {}", err);
        Error::FailedToDecodeResponse
    })?;

    if !status.is_success() {
        tracing::error!("Google Sheets responded with {}: {}", status, data);
        return Err(match status.as_u16() {
            404 => Error::NotFound("No sheet found"),
            400 => Error::InvalidInput("Invalid sheet range"),
            code => Error::UnexpectedStatus(code),
        });
    }

    tracing::trace!("Response received from Google Sheets: {}", data);

    serde_json::from_str::<R>(&data).map_err(|err| {
        tracing::error!("Failed to decode Google Sheets response: {}", err);
        Error::FailedToDecodeResponse
    })
}
