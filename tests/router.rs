use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use memberbridge::{
    app::App,
    modules::{sheet::service::google_auth::GoogleAuth, tagmango::repository::InMemoryCredentialStore},
    types::{
        AppContext, AppEnvironment, Context, DiscordContext, GoogleContext, SessionContext,
        TagMangoContext,
    },
    utils::database,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPREADSHEET_URL: &str = "https://docs.google.com/spreadsheets/d/sheet-1/edit#gid=0";

fn router(upstream: &str) -> Router {
    let http = reqwest::Client::new();
    let db_conn = database::connect_lazy("postgres://memberbridge@localhost/memberbridge").unwrap();

    App::router(Arc::new(Context {
        app: AppContext {
            host: "127.0.0.1".to_string(),
            environment: AppEnvironment::Development,
            port: 8000,
            url: "http://127.0.0.1:8000".to_string(),
        },
        db_conn,
        credentials: Arc::new(InMemoryCredentialStore::new()),
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
    }))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let res = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = res.status();
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn health_check_responds() {
    let (status, body) = get(router("http://127.0.0.1:9"), "/api").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to MemberBridge API");
}

#[tokio::test]
async fn oauth_link_carries_signed_state() {
    let (status, body) = get(router("http://127.0.0.1:9"), "/api/get-oauth-link").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let url = body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with("https://discord.com/oauth2/authorize?"));
    assert!(url.contains("state="));
}

#[tokio::test]
async fn forged_oauth_state_is_rejected() {
    let (status, body) = get(
        router("http://127.0.0.1:9"),
        "/api/callback?code=grant-code&state=01J6Z3Q8WJ4K2M9N0P1R2S3T4V.deadbeef",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn session_routes_require_bearer_token() {
    for uri in ["/api/services", "/api/guilds", "/api/tagmango/mangoes"] {
        let (status, body) = get(router("http://127.0.0.1:9"), uri).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["message"], "Invalid session token");
    }
}

#[tokio::test]
async fn otp_routes_require_bearer_token() {
    let res = router("http://127.0.0.1:9")
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/send-otp")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "phone": 9999999999u64 }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_spreadsheet_url_is_rejected() {
    let (status, body) = get(
        router("http://127.0.0.1:9"),
        "/api/sheets/internal?spreadSheetUrl=https%3A%2F%2Fexample.com%2Fdoc",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No sheet found");
}

#[tokio::test]
async fn header_row_zero_fails_validation() {
    let (status, body) = get(
        router("http://127.0.0.1:9"),
        &format!(
            "/api/sheets/headers?spreadSheetUrl={}&sheetName=Members&headerRow=0",
            urlencoding::encode(SPREADSHEET_URL)
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
}

#[tokio::test]
async fn invalid_cell_reference_fails_validation() {
    let (status, body) = get(
        router("http://127.0.0.1:9"),
        &format!(
            "/api/sheets/headers/validate?spreadSheetUrl={}&sheetName=Members&phoneCell=A1&emailCell=B0&discordIdCell=C1",
            urlencoding::encode(SPREADSHEET_URL)
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
}

#[tokio::test]
async fn headers_are_validated_and_discord_column_written() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/%27Members%27%21A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!A1", "values": [["phone"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/%27Members%27%21B1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!B1", "values": [["email"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/%27Members%27%21C1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updatedData": { "range": "Members!C1", "values": [["discord_id"]] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        router(&server.uri()),
        &format!(
            "/api/sheets/headers/validate?spreadSheetUrl={}&sheetName=Members&phoneCell=A1&emailCell=B1&discordIdCell=C1",
            urlencoding::encode(SPREADSHEET_URL)
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {
                "phoneNumberHeader": "phone",
                "emailHeader": "email",
                "discordIdHeader": "discord_id"
            },
            "message": "Sheet headers fetched successfully."
        })
    );
}

#[tokio::test]
async fn multi_row_header_fetch_is_an_invalid_row() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/%27Members%27%211%3A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!A1:Z2",
            "values": [["phone"], ["email"]]
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        router(&server.uri()),
        &format!(
            "/api/sheets/headers?spreadSheetUrl={}&sheetName=Members&headerRow=1",
            urlencoding::encode(SPREADSHEET_URL)
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Row");
}

#[tokio::test]
async fn login_redirects_to_discord() {
    let res = router("http://127.0.0.1:9")
        .oneshot(Request::builder().uri("/api/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://discord.com/oauth2/authorize?"));
    assert!(location.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8000%2Fapi%2Fcallback"));
}

#[tokio::test]
async fn session_refresh_stays_under_auth() {
    let res = router("http://127.0.0.1:9")
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/refresh")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "token": "stale" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failing_cell_read_fails_whole_header_validation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/%27Members%27%21A1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "status": "INTERNAL" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-1/values/%27Members%27%21B1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!B1", "values": [["email"]]
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sheet-1/values/%27Members%27%21C1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updatedData": { "range": "Members!C1", "values": [["discord_id"]] }
        })))
        .mount(&server)
        .await;

    let (status, body) = get(
        router(&server.uri()),
        &format!(
            "/api/sheets/headers/validate?spreadSheetUrl={}&sheetName=Members&phoneCell=A1&emailCell=B1&discordIdCell=C1",
            urlencoding::encode(SPREADSHEET_URL)
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Google Sheets is unavailable");
    assert!(body.get("data").is_none());
}
