mod session;

use serde::{Deserialize, Serialize};

use streamsphere_common::get_current_timestamp;
use streamsphere_database::DbObject;

use crate::FavoriteAction;

pub use session::{SessionClaims, AUTH_TOKEN_TTL_SECS};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub favorite_media: Vec<String>,
    #[serde(default)]
    pub favorite_genres: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,

    // older documents were created before preferences existed
    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl DbObject for User {
    const COLLECTION_NAME: &'static str = "users";

    fn get_id(&self) -> &str {
        &self.id
    }
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = get_current_timestamp();
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    pub fn has_favorite(&self, media_id: &str) -> bool {
        self.preferences.favorite_media.iter().any(|id| id == media_id)
    }

    /// Flips membership of `media_id` in the favorites set.
    pub fn toggle_favorite(&mut self, media_id: &str) -> FavoriteAction {
        let favorites = &mut self.preferences.favorite_media;
        let action = match favorites.iter().position(|id| id == media_id) {
            Some(index) => {
                favorites.remove(index);
                FavoriteAction::Removed
            }
            None => {
                favorites.push(media_id.to_string());
                FavoriteAction::Added
            }
        };
        self.updated_at = get_current_timestamp();
        action
    }
}
