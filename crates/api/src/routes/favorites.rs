use axum::{
    extract::{Extension, Path, State},
    middleware,
    routing::{get, post},
    Json, Router,
};

use streamsphere_database::DocumentStore;
use streamsphere_runtime::{
    check_favorite, list_favorites, toggle_favorite, FavoriteCheckResponse, FavoriteToggleResponse,
    FavoritesResponse, PaymentProvider,
};

use super::favorites_error;
use crate::{authenticate, response::AppError, AuthenticatedUser, GlobalState};

pub fn favorites_routes<S: DocumentStore, P: PaymentProvider>(state: &GlobalState<S, P>) -> Router<GlobalState<S, P>> {
    Router::new()
        .route("/favorites",
            get(favorites::<S, P>)
        )
        .route("/favorites/{media_id}",
            post(toggle::<S, P>)
        )
        .route("/favorites/check/{media_id}",
            get(check::<S, P>)
        )
        .route_layer(middleware::from_fn_with_state(state.session_key.clone(), authenticate))
}

async fn toggle<S: DocumentStore, P: PaymentProvider>(
    State(state): State<GlobalState<S, P>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(media_id): Path<String>,
) -> Result<Json<FavoriteToggleResponse>, AppError> {
    let update = toggle_favorite(&state.store, &auth.user_id, &media_id)
        .await
        .map_err(favorites_error)?;

    Ok(Json(FavoriteToggleResponse {
        success: true,
        message: update.action.message().to_string(),
        favorites: update.favorites,
    }))
}

async fn check<S: DocumentStore, P: PaymentProvider>(
    State(state): State<GlobalState<S, P>>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(media_id): Path<String>,
) -> Result<Json<FavoriteCheckResponse>, AppError> {
    let in_favorites = check_favorite(&state.store, &auth.user_id, &media_id)
        .await
        .map_err(favorites_error)?;

    Ok(Json(FavoriteCheckResponse {
        success: true,
        in_favorites,
    }))
}

async fn favorites<S: DocumentStore, P: PaymentProvider>(
    State(state): State<GlobalState<S, P>>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<FavoritesResponse>, AppError> {
    let favorites = list_favorites(&state.store, &auth.user_id)
        .await
        .map_err(favorites_error)?;

    Ok(Json(FavoritesResponse {
        success: true,
        favorites,
    }))
}
