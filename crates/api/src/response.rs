use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

// Make our own error that wraps `anyhow::Error`.
#[derive(Debug)]
pub struct AppError(pub StatusCode, pub anyhow::Error);

impl AppError {
    pub fn new(status: StatusCode, err: anyhow::Error) -> Self {
        Self(status, err)
    }

    pub fn message(status: StatusCode, message: &str) -> Self {
        Self(status, anyhow::anyhow!("{}", message))
    }
}

// Every failure leaves as `{ success: false, message }`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            tracing::error!("CODE: {}, MESSAGE: {:#}", self.0.as_u16(), self.1);
        } else {
            tracing::debug!("CODE: {}, MESSAGE: {}", self.0.as_u16(), self.1);
        }

        let body = json!({
            "success": false,
            "message": self.1.to_string(),
        });
        (self.0, Json(body)).into_response()
    }
}

// The timeout layer answers with an empty 408; give it the usual failure body.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::message(StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response();
    }
    response
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>` to turn them into
// `Result<_, AppError>`. Anything not mapped explicitly is a server fault.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(StatusCode::INTERNAL_SERVER_ERROR, err.into())
    }
}
