use crate::types::DiscordContext;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const SCOPES: &str = "identify email guilds";

#[derive(Debug)]
pub enum Error {
    RequestNotSent,
    InvalidHttpResponseStatusCode,
    FailedToDecodeResponse,
}

type Result<T> = std::result::Result<T, Error>;

pub fn generate_oauth_link(ctx: &DiscordContext, state: &str) -> String {
    format!(
        "{}?response_type=code&client_id={}&scope={}&redirect_uri={}&state={}&prompt=consent",
        ctx.authorize_endpoint,
        urlencoding::encode(&ctx.client_id),
        urlencoding::encode(SCOPES),
        urlencoding::encode(&ctx.redirect_url),
        urlencoding::encode(state),
    )
}

#[derive(Deserialize, Serialize, Debug)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

pub async fn exchange_grant_code_for_tokens(ctx: &DiscordContext, code: &str) -> Result<Tokens> {
    let res = ctx
        .http
        .post(format!("{}/oauth2/token", ctx.api_endpoint))
        .form(&[
            ("client_id", ctx.client_id.as_str()),
            ("client_secret", ctx.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", ctx.redirect_url.as_str()),
        ])
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to send Discord token request: {}", err);
            Error::RequestNotSent
        })?;

    decode_response(res).await
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
}

pub async fn fetch_current_user(ctx: &DiscordContext, access_token: &str) -> Result<User> {
    send_discord_request(ctx, "/users/@me", access_token).await
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Guild {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    pub permissions: Option<String>,
}

pub async fn fetch_current_user_guilds(ctx: &DiscordContext, access_token: &str) -> Result<Vec<Guild>> {
    send_discord_request(ctx, "/users/@me/guilds", access_token).await
}

async fn send_discord_request<R: DeserializeOwned>(
    ctx: &DiscordContext,
    route: &str,
    access_token: &str,
) -> Result<R> {
    let res = ctx
        .http
        .get(format!("{}{}", ctx.api_endpoint, route))
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to send Discord request to {}: {}", route, err);
            Error::RequestNotSent
        })?;

    decode_response(res).await
}

async fn decode_response<R: DeserializeOwned>(res: reqwest::Response) -> Result<R> {
    let status = res.status();

    let data = res.text().await.map_err(|err| {
        tracing::error!("Failed to get text of Discord response: {}", err);
        Error::FailedToDecodeResponse
    })?;

    if !status.is_success() {
        tracing::error!("Got unexpected Discord response status {}: {}", status, data);
        return Err(Error::InvalidHttpResponseStatusCode);
    }

    tracing::trace!("Response received from Discord server: {}", data);

    serde_json::from_str::<R>(&data).map_err(|err| {
        tracing::error!("Failed to decode Discord response: {}", err);
        Error::FailedToDecodeResponse
    })
}
