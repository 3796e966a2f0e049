use axum::{
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};

use streamsphere_database::DocumentStore;
use streamsphere_runtime::{CurrentUserResponse, PaymentProvider, User};

use crate::{authenticate, response::AppError, AuthenticatedUser, GlobalState};

pub fn user_routes<S: DocumentStore, P: PaymentProvider>(state: &GlobalState<S, P>) -> Router<GlobalState<S, P>> {
    Router::new()
        .route("/current/user", get(current_user::<S, P>))
        .route_layer(middleware::from_fn_with_state(state.session_key.clone(), authenticate))
}

async fn current_user<S: DocumentStore, P: PaymentProvider>(
    State(state): State<GlobalState<S, P>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let user = state
        .store
        .find_by_id::<User>(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::message(StatusCode::NOT_FOUND, "User not found"))?;

    Ok(Json(CurrentUserResponse { success: true, user }))
}
