use super::super::repository::{self, Session};
use crate::{modules::customer::repository::Customer, types::Context};
use chrono::{NaiveDateTime, Utc};
use sha2::{Digest, Sha256};
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    Database,
    UnknownToken,
    ExpiredToken,
}

type Result<T> = std::result::Result<T, Error>;

/// Opaque 64 hex character token. Hashing two ULIDs keeps their randomness
/// but hides the creation timestamp they carry.
fn mint_token() -> String {
    let mut hasher = Sha256::new();
    hasher.update(Ulid::new().to_bytes());
    hasher.update(Ulid::new().to_bytes());
    hex::encode(hasher.finalize())
}

fn ensure_unexpired(expires_at: NaiveDateTime, now: NaiveDateTime) -> Result<()> {
    if expires_at <= now {
        return Err(Error::ExpiredToken);
    }

    Ok(())
}

pub async fn create_session(ctx: &Context, customer_id: &str) -> Result<Session> {
    repository::create(
        &ctx.db_conn.pool,
        repository::SessionCreationPayload {
            customer_id: customer_id.to_string(),
            access_token: mint_token(),
            refresh_token: mint_token(),
        },
    )
    .await
    .map_err(|_| Error::Database)
}

/// Customer owning a live access token, resolved in one query.
pub async fn verify_access_token(ctx: &Context, access_token: &str) -> Result<Customer> {
    let found = repository::find_customer_by_access_token(&ctx.db_conn.pool, access_token)
        .await
        .map_err(|_| Error::Database)?
        .ok_or(Error::UnknownToken)?;

    ensure_unexpired(found.access_token_expires_at, Utc::now().naive_utc())?;

    Ok(found.customer)
}

/// Issues a new token pair for the session holding `refresh_token`. The old
/// pair stops working immediately; a token can be rotated only once.
pub async fn rotate_session(ctx: &Context, refresh_token: &str) -> Result<Session> {
    let session = repository::find_by_refresh_token(&ctx.db_conn.pool, refresh_token)
        .await
        .map_err(|_| Error::Database)?
        .ok_or(Error::UnknownToken)?;

    ensure_unexpired(session.refresh_token_expires_at, Utc::now().naive_utc())?;

    repository::rotate_tokens(
        &ctx.db_conn.pool,
        &session.id,
        refresh_token,
        repository::UpdateSessionPayload {
            access_token: mint_token(),
            refresh_token: mint_token(),
        },
    )
    .await
    .map_err(|_| Error::Database)?
    .ok_or(Error::UnknownToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn minted_tokens_are_distinct_hex() {
        let first = mint_token();
        let second = mint_token();

        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn token_expiring_now_is_expired() {
        let now = Utc::now().naive_utc();

        assert!(ensure_unexpired(now + Duration::try_minutes(1).unwrap(), now).is_ok());
        assert!(matches!(ensure_unexpired(now, now), Err(Error::ExpiredToken)));
        assert!(matches!(
            ensure_unexpired(now - Duration::try_days(1).unwrap(), now),
            Err(Error::ExpiredToken)
        ));
    }

    #[tokio::test]
    async fn unreachable_database_is_not_reported_as_bad_token() {
        let ctx = Context {
            db_conn: crate::utils::database::connect_lazy("postgres://memberbridge@127.0.0.1:9/memberbridge")
                .unwrap(),
            ..Context::for_tests("http://127.0.0.1:9")
        };

        assert!(matches!(
            verify_access_token(&ctx, "some-token").await,
            Err(Error::Database)
        ));
        assert!(matches!(
            rotate_session(&ctx, "some-token").await,
            Err(Error::Database)
        ));
    }
}
