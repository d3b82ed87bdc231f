pub use crate::utils::database;
use crate::modules::{sheet::service::google_auth::GoogleAuth, tagmango::repository};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::env;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct SessionContext {
    pub secret: String,
}

#[derive(Clone)]
pub struct TagMangoContext {
    pub api_endpoint: String,
    /// Host sent on the OTP and token endpoints.
    pub whitelabel_host: String,
    /// Host of the tenant whose subscribers and mangoes are listed.
    pub tenant_host: String,
    pub http: reqwest::Client,
}

#[derive(Clone)]
pub struct DiscordContext {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub api_endpoint: String,
    pub authorize_endpoint: String,
    pub http: reqwest::Client,
}

#[derive(Clone)]
pub struct GoogleContext {
    pub sheets_api_endpoint: String,
    pub auth: Arc<GoogleAuth>,
    pub http: reqwest::Client,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub credentials: Arc<dyn repository::CredentialStore>,
    pub session: SessionContext,
    pub tagmango: TagMangoContext,
    pub discord: DiscordContext,
    pub google: GoogleContext,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct TagMangoConfig {
    pub api_endpoint: String,
    pub whitelabel_host: String,
    pub tenant_host: String,
}

#[derive(Clone)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub api_endpoint: String,
    pub authorize_endpoint: String,
}

#[derive(Clone)]
pub enum GoogleCredentialsConfig {
    /// Base64 encoded service account key file.
    ServiceAccount(String),
    StaticToken(String),
}

#[derive(Clone)]
pub struct GoogleConfig {
    pub sheets_api_endpoint: String,
    pub credentials: GoogleCredentialsConfig,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub session: SessionConfig,
    pub tagmango: TagMangoConfig,
    pub discord: DiscordConfig,
    pub google: GoogleConfig,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let session_secret = env::var("SESSION_SECRET").expect("SESSION_SECRET not set");
        let tagmango_api_endpoint = env::var("TAGMANGO_API_ENDPOINT")
            .unwrap_or_else(|_| "https://api-prod-new.tagmango.com".to_string());
        let tagmango_whitelabel_host =
            env::var("TAGMANGO_WHITELABEL_HOST").unwrap_or_else(|_| "tagmango.com".to_string());
        let tagmango_tenant_host =
            env::var("TAGMANGO_TENANT_HOST").expect("TAGMANGO_TENANT_HOST not set");
        let discord_client_id = env::var("DISCORD_CLIENT_ID").expect("DISCORD_CLIENT_ID not set");
        let discord_client_secret =
            env::var("DISCORD_CLIENT_SECRET").expect("DISCORD_CLIENT_SECRET not set");
        let discord_redirect_url =
            env::var("DISCORD_REDIRECT_URL").unwrap_or_else(|_| format!("{}/api/callback", url));
        let discord_api_endpoint = env::var("DISCORD_API_ENDPOINT")
            .unwrap_or_else(|_| "https://discord.com/api/v10".to_string());
        let discord_authorize_endpoint = env::var("DISCORD_AUTHORIZE_ENDPOINT")
            .unwrap_or_else(|_| "https://discord.com/oauth2/authorize".to_string());
        let google_sheets_api_endpoint = env::var("GOOGLE_SHEETS_API_ENDPOINT")
            .unwrap_or_else(|_| "https://sheets.googleapis.com".to_string());
        let google_credentials = match (
            env::var("GOOGLE_SERVICE_ACCOUNT_CREDENTIALS"),
            env::var("GOOGLE_ACCESS_TOKEN"),
        ) {
            (Ok(encoded), _) => GoogleCredentialsConfig::ServiceAccount(encoded),
            (_, Ok(token)) => GoogleCredentialsConfig::StaticToken(token),
            _ => panic!("Neither GOOGLE_SERVICE_ACCOUNT_CREDENTIALS nor GOOGLE_ACCESS_TOKEN is set"),
        };

        Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            session: SessionConfig {
                secret: session_secret,
            },
            tagmango: TagMangoConfig {
                api_endpoint: tagmango_api_endpoint,
                whitelabel_host: tagmango_whitelabel_host,
                tenant_host: tagmango_tenant_host,
            },
            discord: DiscordConfig {
                client_id: discord_client_id,
                client_secret: discord_client_secret,
                redirect_url: discord_redirect_url,
                api_endpoint: discord_api_endpoint,
                authorize_endpoint: discord_authorize_endpoint,
            },
            google: GoogleConfig {
                sheets_api_endpoint: google_sheets_api_endpoint,
                credentials: google_credentials,
            },
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        let db_conn = database::connect(self.database.url.as_str()).await;
        database::migrate(db_conn.clone()).await;

        let http = reqwest::Client::new();

        let google_auth = match self.google.credentials {
            GoogleCredentialsConfig::ServiceAccount(encoded) => {
                let decoded = BASE64_STANDARD
                    .decode(encoded)
                    .expect("Invalid GOOGLE_SERVICE_ACCOUNT_CREDENTIALS encoding");
                let decoded = String::from_utf8(decoded)
                    .expect("Invalid GOOGLE_SERVICE_ACCOUNT_CREDENTIALS contents");
                GoogleAuth::service_account(http.clone(), &decoded)
                    .expect("Invalid Google service account key")
            }
            GoogleCredentialsConfig::StaticToken(token) => GoogleAuth::Static(token),
        };

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            credentials: Arc::new(repository::PgCredentialStore::new(db_conn.clone())),
            db_conn,
            session: SessionContext {
                secret: self.session.secret,
            },
            tagmango: TagMangoContext {
                api_endpoint: self.tagmango.api_endpoint,
                whitelabel_host: self.tagmango.whitelabel_host,
                tenant_host: self.tagmango.tenant_host,
                http: http.clone(),
            },
            discord: DiscordContext {
                client_id: self.discord.client_id,
                client_secret: self.discord.client_secret,
                redirect_url: self.discord.redirect_url,
                api_endpoint: self.discord.api_endpoint,
                authorize_endpoint: self.discord.authorize_endpoint,
                http: http.clone(),
            },
            google: GoogleContext {
                sheets_api_endpoint: self.google.sheets_api_endpoint,
                auth: Arc::new(google_auth),
                http,
            },
        }
    }
}

#[cfg(test)]
impl Context {
    /// Context whose providers all point at `upstream` and whose pool never connects.
    pub fn for_tests(upstream: &str) -> Self {
        let http = reqwest::Client::new();

        Context {
            app: AppContext {
                host: "127.0.0.1".to_string(),
                environment: AppEnvironment::Development,
                port: 8000,
                url: "http://127.0.0.1:8000".to_string(),
            },
            db_conn: database::connect_lazy("postgres://memberbridge@localhost/memberbridge")
                .expect("lazy pool"),
            credentials: Arc::new(repository::InMemoryCredentialStore::new()),
            session: SessionContext {
                secret: "session-secret".to_string(),
            },
            tagmango: TagMangoContext {
                api_endpoint: upstream.to_string(),
                whitelabel_host: "tagmango.com".to_string(),
                tenant_host: "members.example.com".to_string(),
                http: http.clone(),
            },
            discord: DiscordContext {
                client_id: "client-id".to_string(),
                client_secret: "client-secret".to_string(),
                redirect_url: "http://127.0.0.1:8000/api/callback".to_string(),
                api_endpoint: upstream.to_string(),
                authorize_endpoint: "https://discord.com/oauth2/authorize".to_string(),
                http: http.clone(),
            },
            google: GoogleContext {
                sheets_api_endpoint: upstream.to_string(),
                auth: Arc::new(GoogleAuth::Static("static-token".to_string())),
                http,
            },
        }
    }
}
