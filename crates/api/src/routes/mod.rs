mod favorites;
mod genres;
mod misc;
mod payment;
mod user;

pub use favorites::favorites_routes;
pub use genres::genre_routes;
pub use misc::misc_routes;
pub use payment::payment_routes;
pub use user::user_routes;

use axum::http::StatusCode;
use streamsphere_runtime::FavoritesError;

use crate::response::AppError;

pub(crate) fn favorites_error(err: FavoritesError) -> AppError {
    match err {
        FavoritesError::NotFound => AppError::message(StatusCode::NOT_FOUND, "User not found"),
        FavoritesError::InvalidMediaId => AppError::message(StatusCode::BAD_REQUEST, "Invalid media id"),
        FavoritesError::Store(e) => AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}
