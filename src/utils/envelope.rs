use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

/// `{ success: true, data, message }`
pub fn success<T: Serialize>(status: StatusCode, data: T, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": true,
            "data": data,
            "message": message,
        })),
    )
        .into_response()
}

pub fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "message": message,
        })),
    )
        .into_response()
}

/// Failure carrying a payload, e.g. the raw body returned by an upstream provider.
pub fn failure_with_data(status: StatusCode, data: Value, message: &str) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "data": data,
            "message": message,
        })),
    )
        .into_response()
}

#[cfg(test)]
pub async fn read(res: Response) -> (StatusCode, Value) {
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("readable body");
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}
