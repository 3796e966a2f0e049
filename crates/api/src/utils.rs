use axum::extract::Request;
use axum::http::{header, StatusCode};
use tracing_subscriber::EnvFilter;

use crate::response::AppError;

pub fn extract_bearer_token(req: &Request) -> Result<String, AppError> {
    let auth_header = req.headers().get(header::AUTHORIZATION);

    match auth_header {
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| AppError::message(StatusCode::UNAUTHORIZED, "invalid authorization header"))?
                .split_whitespace()
                .collect::<Vec<_>>();

            if value.len() != 2 || value[0] != "Bearer" {
                return Err(AppError::message(
                    StatusCode::UNAUTHORIZED,
                    "invalid authorization header",
                ));
            }

            Ok(value[1].to_string())
        }
        _ => Err(AppError::message(
            StatusCode::UNAUTHORIZED,
            "missing authorization header",
        )),
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing subscriber was already installed");
    }
}
