use serde::{Deserialize, Serialize};
use thiserror::Error;

use streamsphere_database::DocumentStore;

use crate::User;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("User not found")]
    NotFound,
    #[error("Invalid media id")]
    InvalidMediaId,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteAction {
    Added,
    Removed,
}

impl FavoriteAction {
    pub fn message(&self) -> &'static str {
        match self {
            FavoriteAction::Added => "Added to favorites",
            FavoriteAction::Removed => "Removed from favorites",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesUpdate {
    pub action: FavoriteAction,
    pub favorites: Vec<String>,
}

fn normalize_media_id(media_id: &str) -> Result<&str, FavoritesError> {
    let media_id = media_id.trim();
    if media_id.is_empty() {
        return Err(FavoritesError::InvalidMediaId);
    }
    Ok(media_id)
}

async fn load_user<S: DocumentStore>(store: &S, user_id: &str) -> Result<User, FavoritesError> {
    store
        .find_by_id::<User>(user_id)
        .await?
        .ok_or(FavoritesError::NotFound)
}

/// Adds `media_id` to the user's favorites if absent, removes it otherwise.
///
/// Concurrent toggles by the same user are last-write-wins.
pub async fn toggle_favorite<S: DocumentStore>(
    store: &S,
    user_id: &str,
    media_id: &str,
) -> Result<FavoritesUpdate, FavoritesError> {
    let media_id = normalize_media_id(media_id)?;
    let mut user = load_user(store, user_id).await?;

    let action = user.toggle_favorite(media_id);
    if !store.replace(&user).await? {
        return Err(FavoritesError::NotFound);
    }

    tracing::debug!("[toggle_favorite] {} {:?} {}", user_id, action, media_id);
    Ok(FavoritesUpdate {
        action,
        favorites: user.preferences.favorite_media,
    })
}

pub async fn check_favorite<S: DocumentStore>(
    store: &S,
    user_id: &str,
    media_id: &str,
) -> Result<bool, FavoritesError> {
    let media_id = normalize_media_id(media_id)?;
    let user = load_user(store, user_id).await?;
    Ok(user.has_favorite(media_id))
}

pub async fn list_favorites<S: DocumentStore>(
    store: &S,
    user_id: &str,
) -> Result<Vec<String>, FavoritesError> {
    let user = load_user(store, user_id).await?;
    Ok(user.preferences.favorite_media)
}
