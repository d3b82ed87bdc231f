use crate::utils::database::DatabaseConnection;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use ulid::Ulid;

/// TagMango token pair persisted for a customer after a successful OTP login.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Credential {
    pub id: String,
    pub customer_id: String,
    pub phone: String,
    pub access_token: String,
    pub refresh_token: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

pub struct UpsertCredentialPayload {
    pub customer_id: String,
    pub phone: String,
    pub access_token: String,
    pub refresh_token: String,
}

pub struct UpdateTokensPayload {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

pub struct WriteAck {
    pub acknowledged: bool,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts the credential, or overwrites the tokens and phone of the one
    /// already stored for `customer_id`.
    async fn upsert(&self, payload: UpsertCredentialPayload) -> Result<WriteAck>;

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<Credential>>;

    /// Keeps the stored refresh token when `refresh_token` is `None`.
    async fn update_tokens_by_customer_id(
        &self,
        customer_id: &str,
        payload: UpdateTokensPayload,
    ) -> Result<WriteAck>;
}

pub struct PgCredentialStore {
    db_conn: DatabaseConnection,
}

impl PgCredentialStore {
    pub fn new(db_conn: DatabaseConnection) -> Self {
        Self { db_conn }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn upsert(&self, payload: UpsertCredentialPayload) -> Result<WriteAck> {
        sqlx::query(
            "
            INSERT INTO tagmango_credentials
                (id, customer_id, phone, access_token, refresh_token)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (customer_id) DO UPDATE SET
                phone = EXCLUDED.phone,
                access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                updated_at = NOW()
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(&payload.customer_id)
        .bind(&payload.phone)
        .bind(&payload.access_token)
        .bind(&payload.refresh_token)
        .execute(&self.db_conn.pool)
        .await
        .map(|res| WriteAck {
            acknowledged: res.rows_affected() == 1,
        })
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to upsert credential for customer {}: {}",
                payload.customer_id,
                err
            );
            Error::UnexpectedError
        })
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<Credential>> {
        sqlx::query_as::<_, Credential>(
            "SELECT * FROM tagmango_credentials WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.db_conn.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching credential for customer {}: {}",
                customer_id,
                err
            );
            Error::UnexpectedError
        })
    }

    async fn update_tokens_by_customer_id(
        &self,
        customer_id: &str,
        payload: UpdateTokensPayload,
    ) -> Result<WriteAck> {
        sqlx::query(
            "
            UPDATE tagmango_credentials SET
                access_token = $1,
                refresh_token = COALESCE($2, refresh_token),
                updated_at = NOW()
            WHERE
                customer_id = $3
            ",
        )
        .bind(&payload.access_token)
        .bind(&payload.refresh_token)
        .bind(customer_id)
        .execute(&self.db_conn.pool)
        .await
        .map(|res| WriteAck {
            acknowledged: res.rows_affected() == 1,
        })
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating tokens for customer {}: {}",
                customer_id,
                err
            );
            Error::UnexpectedError
        })
    }
}

/// Process-local store keyed by customer id.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    data: Mutex<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.data.lock().await.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn upsert(&self, payload: UpsertCredentialPayload) -> Result<WriteAck> {
        let mut data = self.data.lock().await;
        let now = Utc::now().naive_utc();

        match data.get_mut(&payload.customer_id) {
            Some(existing) => {
                existing.phone = payload.phone;
                existing.access_token = payload.access_token;
                existing.refresh_token = payload.refresh_token;
                existing.updated_at = Some(now);
            }
            None => {
                data.insert(
                    payload.customer_id.clone(),
                    Credential {
                        id: Ulid::new().to_string(),
                        customer_id: payload.customer_id,
                        phone: payload.phone,
                        access_token: payload.access_token,
                        refresh_token: payload.refresh_token,
                        created_at: now,
                        updated_at: None,
                    },
                );
            }
        }

        Ok(WriteAck { acknowledged: true })
    }

    async fn find_by_customer_id(&self, customer_id: &str) -> Result<Option<Credential>> {
        Ok(self.data.lock().await.get(customer_id).cloned())
    }

    async fn update_tokens_by_customer_id(
        &self,
        customer_id: &str,
        payload: UpdateTokensPayload,
    ) -> Result<WriteAck> {
        let mut data = self.data.lock().await;

        let Some(existing) = data.get_mut(customer_id) else {
            return Ok(WriteAck {
                acknowledged: false,
            });
        };

        existing.access_token = payload.access_token;
        if let Some(refresh_token) = payload.refresh_token {
            existing.refresh_token = refresh_token;
        }
        existing.updated_at = Some(Utc::now().naive_utc());

        Ok(WriteAck { acknowledged: true })
    }
}
