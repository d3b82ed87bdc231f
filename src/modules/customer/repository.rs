use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgExecutor;
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Customer {
    pub id: String,
    pub discord_id: String,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub discord_access_token: String,
    #[serde(skip_serializing)]
    pub discord_refresh_token: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct UpsertCustomerPayload {
    pub discord_id: String,
    pub username: String,
    pub email: Option<String>,
    pub discord_access_token: String,
    pub discord_refresh_token: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub async fn upsert_by_discord_id<'e, E>(e: E, payload: UpsertCustomerPayload) -> Result<Customer>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Customer>(
        "
        INSERT INTO customers
            (id, discord_id, username, email, discord_access_token, discord_refresh_token)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (discord_id) DO UPDATE SET
            username = EXCLUDED.username,
            email = COALESCE(EXCLUDED.email, customers.email),
            discord_access_token = EXCLUDED.discord_access_token,
            discord_refresh_token = EXCLUDED.discord_refresh_token,
            updated_at = NOW()
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&payload.discord_id)
    .bind(&payload.username)
    .bind(&payload.email)
    .bind(&payload.discord_access_token)
    .bind(&payload.discord_refresh_token)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while upserting customer with discord id {}: {}",
            payload.discord_id,
            err
        );
        Error::UnexpectedError
    })
}
