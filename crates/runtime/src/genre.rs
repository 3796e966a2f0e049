use anyhow::Result;
use serde::{Deserialize, Serialize};

use streamsphere_database::{DbObject, DocumentStore};

pub const DEFAULT_GENRES: [&str; 14] = [
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Thriller",
    "Horror",
    "Romance",
    "Science Fiction",
    "Fantasy",
    "Mystery",
    "Crime",
    "Animation",
    "Family",
    "Documentary",
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Genre {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

impl DbObject for Genre {
    const COLLECTION_NAME: &'static str = "genres";

    fn get_id(&self) -> &str {
        &self.id
    }
}

impl Genre {
    /// The id is derived from the trimmed name, which keeps names unique.
    pub fn new(name: &str) -> Self {
        let name = name.trim().to_string();
        let id = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-");
        Self { id, name }
    }
}

pub async fn list_genre_names<S: DocumentStore>(store: &S) -> Result<Vec<String>> {
    let mut names = store
        .find_all::<Genre>()
        .await?
        .into_iter()
        .map(|genre| genre.name)
        .collect::<Vec<_>>();
    names.sort();
    names.dedup();
    Ok(names)
}
