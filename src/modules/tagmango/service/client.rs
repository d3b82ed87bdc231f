//! Stateless wrapper over the TagMango HTTP API.
//!
//! Every endpoint answers with `{ code, type, result? }`. Anything other than
//! `code == 0 && type == "OK"` is handed back to the caller untouched as
//! [`Error::Api`].

use crate::{modules::tagmango::repository::Credential, types::TagMangoContext};
use axum::http::Method;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug)]
pub enum Error {
    RequestNotSent,
    FailedToDecodeResponse,
    /// Raw body of a non-success envelope.
    Api(Value),
    /// Success envelope whose `result` does not have the expected shape.
    ContractViolation(String),
    MissingCredential,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetOtpPayload {
    pub phone: u64,
    pub user_agent: String,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpPayload {
    pub phone: u64,
    pub otp: u32,
    pub user_agent: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResult {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResult {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubscribersQuery {
    pub page: u32,
    #[serde(rename = "type")]
    pub r#type: String,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mangoes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl Default for SubscribersQuery {
    fn default() -> Self {
        Self {
            page: 1,
            r#type: String::from("all"),
            page_size: 25,
            mangoes: None,
            term: None,
        }
    }
}

pub async fn get_otp(ctx: &TagMangoContext, payload: GetOtpPayload) -> Result<Value> {
    send_tagmango_request(
        ctx,
        SendTagMangoRequestPayload {
            route: "/get-otp",
            method: Method::POST,
            host: &ctx.whitelabel_host,
            bearer: None,
            query: None::<&()>,
            body: Some(serialize_body(&payload)?),
            success: SuccessCheck::CodeAndType,
        },
    )
    .await
}

pub async fn verify_otp(ctx: &TagMangoContext, payload: VerifyOtpPayload) -> Result<VerifyOtpResult> {
    let result = send_tagmango_request(
        ctx,
        SendTagMangoRequestPayload {
            route: "/verify-otp",
            method: Method::POST,
            host: &ctx.whitelabel_host,
            bearer: None,
            query: None::<&()>,
            body: Some(serialize_body(&payload)?),
            success: SuccessCheck::CodeOnly,
        },
    )
    .await?;

    if result.is_null() {
        return Ok(VerifyOtpResult {
            access_token: None,
            refresh_token: None,
            extra: Map::new(),
        });
    }

    decode_result(result)
}

/// Exchanges a refresh token for a fresh access token. Nothing is persisted here.
pub async fn get_access_token(ctx: &TagMangoContext, refresh_token: &str) -> Result<AccessTokenResult> {
    let result = send_tagmango_request(
        ctx,
        SendTagMangoRequestPayload {
            route: "/get-access-token",
            method: Method::POST,
            host: &ctx.whitelabel_host,
            bearer: None,
            query: None::<&()>,
            body: Some(serde_json::json!({ "refreshToken": refresh_token })),
            success: SuccessCheck::CodeAndType,
        },
    )
    .await?;

    decode_result(result)
}

pub async fn get_subscribers(
    ctx: &TagMangoContext,
    query: &SubscribersQuery,
    token: &str,
    tenant_host: &str,
) -> Result<Value> {
    send_tagmango_request(
        ctx,
        SendTagMangoRequestPayload {
            route: "/v2/subscribers",
            method: Method::GET,
            host: tenant_host,
            bearer: Some(token),
            query: Some(query),
            body: None,
            success: SuccessCheck::CodeAndType,
        },
    )
    .await
}

pub async fn get_all_active_mangoes(
    ctx: &TagMangoContext,
    credential: Option<&Credential>,
    tenant_host: &str,
) -> Result<Value> {
    let credential = credential.ok_or(Error::MissingCredential)?;

    send_tagmango_request(
        ctx,
        SendTagMangoRequestPayload {
            route: "/get-all-active-mangoes",
            method: Method::GET,
            host: tenant_host,
            bearer: Some(credential.access_token.as_str()),
            query: None::<&()>,
            body: None,
            success: SuccessCheck::CodeAndType,
        },
    )
    .await
}

enum SuccessCheck {
    CodeAndType,
    CodeOnly,
}

impl SuccessCheck {
    fn accepts(&self, envelope: &Value) -> bool {
        let code_ok = envelope.get("code").and_then(Value::as_i64) == Some(0);
        match self {
            Self::CodeOnly => code_ok,
            Self::CodeAndType => {
                code_ok && envelope.get("type").and_then(Value::as_str) == Some("OK")
            }
        }
    }
}

struct SendTagMangoRequestPayload<'a, Q: Serialize + ?Sized> {
    pub route: &'a str,
    pub method: Method,
    pub host: &'a str,
    pub bearer: Option<&'a str>,
    pub query: Option<&'a Q>,
    pub body: Option<Value>,
    pub success: SuccessCheck,
}

/// Sends the request and returns the envelope's `result` (`null` when absent).
async fn send_tagmango_request<'a, Q: Serialize + ?Sized>(
    ctx: &TagMangoContext,
    payload: SendTagMangoRequestPayload<'a, Q>,
) -> Result<Value> {
    let url = format!("{}{}", ctx.api_endpoint, payload.route);
    let mut req = match payload.method {
        Method::GET => ctx.http.get(url),
        _ => ctx.http.post(url),
    };

    req = req
        .header("x-whitelabel-host", payload.host)
        .header("Content-Type", "application/json");

    if let Some(token) = payload.bearer {
        req = req.header("authorization", format!("Bearer {}", token));
    }

    if let Some(query) = payload.query {
        req = req.query(query);
    }

    if let Some(body) = payload.body {
        req = req.body(body.to_string());
    }

    let res = req.send().await.map_err(|err| {
        tracing::error!("Failed to send TagMango request to {}: {}", payload.route, err);
        Error::RequestNotSent
    })?;

    let status = res.status();
    let data = res.text().await.map_err(|err| {
        tracing::error!("Failed to read TagMango response body: {}", err);
        Error::FailedToDecodeResponse
    })?;

    tracing::trace!("Response received from TagMango server ({}): {}", status, data);

    let envelope = serde_json::from_str::<Value>(&data).map_err(|err| {
        tracing::error!("Failed to decode TagMango response: {}", err);
        Error::FailedToDecodeResponse
    })?;

    if !payload.success.accepts(&envelope) {
        tracing::warn!(
            "TagMango rejected request to {} with status {}",
            payload.route,
            status
        );
        return Err(Error::Api(envelope));
    }

    Ok(envelope.get("result").cloned().unwrap_or(Value::Null))
}

fn serialize_body<T: Serialize>(body: &T) -> Result<Value> {
    serde_json::to_value(body).map_err(|err| {
        tracing::error!("Failed to encode TagMango request body: {}", err);
        Error::ContractViolation(err.to_string())
    })
}

fn decode_result<R: DeserializeOwned>(result: Value) -> Result<R> {
    serde_json::from_value::<R>(result).map_err(|err| {
        tracing::error!("TagMango result does not match the expected shape: {}", err);
        Error::ContractViolation(err.to_string())
    })
}
