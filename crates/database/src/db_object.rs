use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

/// A document persisted under a string `_id` in a named collection.
pub trait DbObject:
    Sized + Serialize + DeserializeOwned + Sync + Unpin + Send + Clone + 'static
{
    const COLLECTION_NAME: &'static str;

    fn get_id(&self) -> &str;
}

#[async_trait::async_trait]
pub trait DocumentStore: Clone + Send + Sync + 'static {
    async fn find_by_id<T: DbObject>(&self, id: &str) -> Result<Option<T>>;

    async fn find_all<T: DbObject>(&self) -> Result<Vec<T>>;

    /// Fails when a document with the same id already exists.
    async fn insert<T: DbObject>(&self, obj: &T) -> Result<()>;

    /// Returns `false` when no document with the object's id exists.
    async fn replace<T: DbObject>(&self, obj: &T) -> Result<bool>;

    /// Applies `changes` only while `field` still holds `expected`, as one atomic step.
    /// Returns whether the update was applied.
    async fn update_if<T: DbObject>(
        &self,
        id: &str,
        field: &str,
        expected: Value,
        changes: Map<String, Value>,
    ) -> Result<bool>;
}
