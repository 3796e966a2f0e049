use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use streamsphere_runtime::SessionClaims;

use crate::response::AppError;
use crate::utils::extract_bearer_token;

/// Secret that session tokens are signed with.
#[derive(Clone)]
pub struct SessionKey(Arc<str>);

impl SessionKey {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The user a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
}

pub async fn authenticate(
    State(key): State<SessionKey>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&req)?;
    let claims = SessionClaims::verify(&token, key.as_str())
        .map_err(|e| AppError::new(StatusCode::UNAUTHORIZED, e))?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.user_id,
    });
    Ok(next.run(req).await)
}
