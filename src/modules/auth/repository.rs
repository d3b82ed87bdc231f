use crate::modules::customer::repository::Customer;
use chrono::NaiveDateTime;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub customer_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires_at: NaiveDateTime,
    pub refresh_token_expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

/// Customer row joined with the expiry of the session that looked it up.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct SessionCustomer {
    #[sqlx(flatten)]
    pub customer: Customer,
    pub access_token_expires_at: NaiveDateTime,
}

pub struct SessionCreationPayload {
    pub customer_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct UpdateSessionPayload {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: SessionCreationPayload) -> Result<Session> {
    sqlx::query_as::<_, Session>(
        "
        INSERT INTO sessions (
            id,
            customer_id,
            access_token,
            refresh_token,
            access_token_expires_at,
            refresh_token_expires_at
        )
        VALUES ($1, $2, $3, $4, NOW() + INTERVAL '1 day', NOW() + INTERVAL '30 days')
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.customer_id)
    .bind(&payload.access_token)
    .bind(&payload.refresh_token)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating session for customer {}: {}",
            payload.customer_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_customer_by_access_token<'e, E: PgExecutor<'e>>(
    e: E,
    access_token: &str,
) -> Result<Option<SessionCustomer>> {
    sqlx::query_as::<_, SessionCustomer>(
        "
        SELECT customers.*, sessions.access_token_expires_at
        FROM sessions
        INNER JOIN customers ON customers.id = sessions.customer_id
        WHERE sessions.access_token = $1
        ",
    )
    .bind(access_token)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching customer by access token: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_refresh_token<'e, E: PgExecutor<'e>>(
    e: E,
    refresh_token: &str,
) -> Result<Option<Session>> {
    sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE refresh_token = $1")
        .bind(refresh_token)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching session by refresh token: {}", err);
            Error::UnexpectedError
        })
}

/// Swaps the token pair of a session, provided its refresh token is still
/// `previous_refresh_token`. `None` means a concurrent rotation got there first.
pub async fn rotate_tokens<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
    previous_refresh_token: &str,
    payload: UpdateSessionPayload,
) -> Result<Option<Session>> {
    sqlx::query_as::<_, Session>(
        "
        UPDATE sessions SET
            access_token = $1,
            refresh_token = $2,
            access_token_expires_at = NOW() + INTERVAL '1 day',
            refresh_token_expires_at = NOW() + INTERVAL '30 days',
            updated_at = NOW()
        WHERE
            id = $3
            AND refresh_token = $4
        RETURNING *
        ",
    )
    .bind(&payload.access_token)
    .bind(&payload.refresh_token)
    .bind(id)
    .bind(previous_refresh_token)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while rotating tokens of session {}: {}", id, err);
        Error::UnexpectedError
    })
}
