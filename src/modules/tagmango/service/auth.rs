use super::client;
use crate::{modules::tagmango::repository, types::TagMangoContext};
use serde_json::Value;

#[derive(Debug)]
pub enum Error {
    Client(client::Error),
    /// The provider reported success without handing out both tokens.
    TokenMissing,
    Persistence,
    MissingCredential,
}

impl From<client::Error> for Error {
    fn from(err: client::Error) -> Self {
        match err {
            client::Error::MissingCredential => Self::MissingCredential,
            err => Self::Client(err),
        }
    }
}

type Result<T> = std::result::Result<T, Error>;

pub async fn request_otp(ctx: &TagMangoContext, payload: client::GetOtpPayload) -> Result<Value> {
    Ok(client::get_otp(ctx, payload).await?)
}

/// Verifies the OTP with TagMango and stores the issued token pair for
/// `customer_id`, replacing any credential it already had.
pub async fn verify_otp(
    ctx: &TagMangoContext,
    store: &dyn repository::CredentialStore,
    payload: client::VerifyOtpPayload,
    customer_id: &str,
) -> Result<bool> {
    let phone = payload.phone;
    let result = client::verify_otp(ctx, payload).await?;

    let (access_token, refresh_token) = match (result.access_token, result.refresh_token) {
        (Some(access_token), Some(refresh_token))
            if !access_token.is_empty() && !refresh_token.is_empty() =>
        {
            (access_token, refresh_token)
        }
        _ => {
            tracing::error!("TagMango verified the OTP for {} without issuing tokens", customer_id);
            return Err(Error::TokenMissing);
        }
    };

    let ack = store
        .upsert(repository::UpsertCredentialPayload {
            customer_id: customer_id.to_string(),
            phone: phone.to_string(),
            access_token,
            refresh_token,
        })
        .await
        .map_err(|_| Error::Persistence)?;

    if !ack.acknowledged {
        tracing::error!("Credential write for customer {} was not acknowledged", customer_id);
        return Err(Error::Persistence);
    }

    tracing::info!("Stored TagMango credential for customer {}", customer_id);

    Ok(true)
}

/// Rotates the stored access token of `customer_id` using its refresh token.
pub async fn refresh_credential(
    ctx: &TagMangoContext,
    store: &dyn repository::CredentialStore,
    customer_id: &str,
) -> Result<client::AccessTokenResult> {
    let credential = store
        .find_by_customer_id(customer_id)
        .await
        .map_err(|_| Error::Persistence)?
        .ok_or(Error::MissingCredential)?;

    let refreshed = client::get_access_token(ctx, &credential.refresh_token).await?;

    let ack = store
        .update_tokens_by_customer_id(
            customer_id,
            repository::UpdateTokensPayload {
                access_token: refreshed.access_token.clone(),
                refresh_token: refreshed.refresh_token.clone(),
            },
        )
        .await
        .map_err(|_| Error::Persistence)?;

    if !ack.acknowledged {
        tracing::error!("Token refresh for customer {} was not acknowledged", customer_id);
        return Err(Error::Persistence);
    }

    Ok(refreshed)
}

pub async fn list_subscribers(
    ctx: &TagMangoContext,
    store: &dyn repository::CredentialStore,
    customer_id: &str,
    query: &client::SubscribersQuery,
) -> Result<Value> {
    let credential = store
        .find_by_customer_id(customer_id)
        .await
        .map_err(|_| Error::Persistence)?
        .ok_or(Error::MissingCredential)?;

    Ok(client::get_subscribers(ctx, query, &credential.access_token, &ctx.tenant_host).await?)
}

pub async fn list_active_mangoes(
    ctx: &TagMangoContext,
    store: &dyn repository::CredentialStore,
    customer_id: &str,
) -> Result<Value> {
    let credential = store
        .find_by_customer_id(customer_id)
        .await
        .map_err(|_| Error::Persistence)?;

    Ok(client::get_all_active_mangoes(ctx, credential.as_ref(), &ctx.tenant_host).await?)
}
