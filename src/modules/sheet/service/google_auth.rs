//! Bearer tokens for the Google Sheets API.
//!
//! Service accounts sign an RS256 assertion and trade it at their `token_uri`
//! for an access token (JWT bearer grant). The token is cached and reused until
//! shortly before it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug)]
pub enum Error {
    InvalidCredentials,
    FailedToSignAssertion,
    RequestNotSent,
    TokenExchangeFailed,
    FailedToDecodeResponse,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Deserialize, Clone)]
pub struct ServiceAccountCredentials {
    pub client_email: String,
    pub private_key: String,
    pub token_uri: String,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

pub struct ServiceAccountAuth {
    credentials: ServiceAccountCredentials,
    key: EncodingKey,
    http: reqwest::Client,
    cached_token: RwLock<Option<CachedToken>>,
}

pub enum GoogleAuth {
    ServiceAccount(ServiceAccountAuth),
    /// Pre-issued token, e.g. from `gcloud auth print-access-token`.
    Static(String),
}

impl GoogleAuth {
    /// Builds service-account auth from the contents of a JSON key file.
    pub fn service_account(http: reqwest::Client, key_json: &str) -> Result<Self> {
        let credentials =
            serde_json::from_str::<ServiceAccountCredentials>(key_json).map_err(|err| {
                tracing::error!("Failed to parse Google service account key: {}", err);
                Error::InvalidCredentials
            })?;

        ServiceAccountAuth::new(http, credentials).map(Self::ServiceAccount)
    }

    pub async fn access_token(&self) -> Result<String> {
        match self {
            Self::ServiceAccount(auth) => auth.access_token().await,
            Self::Static(token) => Ok(token.clone()),
        }
    }
}

impl ServiceAccountAuth {
    pub fn new(http: reqwest::Client, credentials: ServiceAccountCredentials) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(credentials.private_key.as_bytes()).map_err(|err| {
            tracing::error!("Invalid Google service account private key: {}", err);
            Error::InvalidCredentials
        })?;

        Ok(Self {
            credentials,
            key,
            http,
            cached_token: RwLock::new(None),
        })
    }

    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = usable_token(self.cached_token.read().await.as_ref()) {
            return Ok(token);
        }

        let mut cached = self.cached_token.write().await;
        // Another caller may have refreshed while this one waited for the lock.
        if let Some(token) = usable_token(cached.as_ref()) {
            return Ok(token);
        }

        let fresh = self.fetch_token().await?;
        let expires_at = expiry_from_now(fresh.expires_in)?;
        let token = fresh.access_token.clone();
        *cached = Some(CachedToken {
            token: fresh.access_token,
            expires_at,
        });

        Ok(token)
    }

    async fn fetch_token(&self) -> Result<TokenResponse> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.credentials.client_email,
            scope: SCOPE,
            aud: &self.credentials.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.key).map_err(|err| {
            tracing::error!("Failed to sign Google token assertion: {}", err);
            Error::FailedToSignAssertion
        })?;

        let res = self
            .http
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Failed to send Google token request: {}", err);
                Error::RequestNotSent
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            tracing::error!("Google token exchange failed ({}): {}", status, body);
            return Err(Error::TokenExchangeFailed);
        }

        res.json::<TokenResponse>().await.map_err(|err| {
            tracing::error!("Failed to decode Google token response: {}", err);
            Error::FailedToDecodeResponse
        })
    }
}

fn usable_token(cached: Option<&CachedToken>) -> Option<String> {
    let margin = Duration::try_seconds(EXPIRY_MARGIN_SECS)?;
    let threshold = Utc::now().checked_add_signed(margin)?;

    cached
        .filter(|token| token.expires_at > threshold)
        .map(|token| token.token.clone())
}

fn expiry_from_now(expires_in: i64) -> Result<DateTime<Utc>> {
    Duration::try_seconds(expires_in)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .ok_or_else(|| {
            tracing::error!("Google token lifetime out of range: {}", expires_in);
            Error::FailedToDecodeResponse
        })
}
