use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::{DbObject, DocumentStore};

type Collection = BTreeMap<String, Value>;

/// Process-local document store. Documents are kept in their JSON form so the
/// same `update_if` guards work as against MongoDB.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<&'static str, Collection>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count<T: DbObject>(&self) -> usize {
        self.collections
            .read()
            .await
            .get(T::COLLECTION_NAME)
            .map(|col| col.len())
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_id<T: DbObject>(&self, id: &str) -> Result<Option<T>> {
        let collections = self.collections.read().await;
        match collections.get(T::COLLECTION_NAME).and_then(|col| col.get(id)) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn find_all<T: DbObject>(&self) -> Result<Vec<T>> {
        let collections = self.collections.read().await;
        let mut vec = Vec::new();
        if let Some(col) = collections.get(T::COLLECTION_NAME) {
            for value in col.values() {
                vec.push(serde_json::from_value(value.clone())?);
            }
        }
        Ok(vec)
    }

    async fn insert<T: DbObject>(&self, obj: &T) -> Result<()> {
        let value = serde_json::to_value(obj)?;
        let mut collections = self.collections.write().await;
        let col = collections.entry(T::COLLECTION_NAME).or_default();
        if col.contains_key(obj.get_id()) {
            return Err(anyhow!(
                "[MemoryStore::insert] duplicate id {} in {}",
                obj.get_id(),
                T::COLLECTION_NAME
            ));
        }
        col.insert(obj.get_id().to_string(), value);
        Ok(())
    }

    async fn replace<T: DbObject>(&self, obj: &T) -> Result<bool> {
        let value = serde_json::to_value(obj)?;
        let mut collections = self.collections.write().await;
        match collections
            .get_mut(T::COLLECTION_NAME)
            .and_then(|col| col.get_mut(obj.get_id()))
        {
            Some(existing) => {
                *existing = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_if<T: DbObject>(
        &self,
        id: &str,
        field: &str,
        expected: Value,
        changes: Map<String, Value>,
    ) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(Value::Object(doc)) = collections
            .get_mut(T::COLLECTION_NAME)
            .and_then(|col| col.get_mut(id))
        else {
            return Ok(false);
        };

        if doc.get(field) != Some(&expected) {
            return Ok(false);
        }
        doc.extend(changes);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ticket {
        #[serde(rename = "_id")]
        id: String,
        state: String,
        seats: i64,
    }

    impl DbObject for Ticket {
        const COLLECTION_NAME: &'static str = "tickets";

        fn get_id(&self) -> &str {
            &self.id
        }
    }

    fn ticket(id: &str) -> Ticket {
        Ticket { id: id.to_string(), state: "open".to_string(), seats: 2 }
    }

    #[tokio::test]
    async fn test_insert_and_find() -> Result<()> {
        let store = MemoryStore::new();
        store.insert(&ticket("t1")).await?;

        let found: Option<Ticket> = store.find_by_id("t1").await?;
        assert_eq!(found, Some(ticket("t1")));

        let missing: Option<Ticket> = store.find_by_id("t2").await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_duplicate_fails() -> Result<()> {
        let store = MemoryStore::new();
        store.insert(&ticket("t1")).await?;
        assert!(store.insert(&ticket("t1")).await.is_err());
        assert_eq!(store.count::<Ticket>().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_requires_existing() -> Result<()> {
        let store = MemoryStore::new();
        let mut t = ticket("t1");
        assert!(!store.replace(&t).await?);

        store.insert(&t).await?;
        t.seats = 5;
        assert!(store.replace(&t).await?);

        let found: Ticket = store.find_by_id("t1").await?.unwrap();
        assert_eq!(found.seats, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_if_applies_once() -> Result<()> {
        let store = MemoryStore::new();
        store.insert(&ticket("t1")).await?;

        let mut changes = Map::new();
        changes.insert("state".to_string(), json!("closed"));

        assert!(store.update_if::<Ticket>("t1", "state", json!("open"), changes.clone()).await?);
        assert!(!store.update_if::<Ticket>("t1", "state", json!("open"), changes.clone()).await?);
        assert!(!store.update_if::<Ticket>("nope", "state", json!("open"), changes).await?);

        let found: Ticket = store.find_by_id("t1").await?.unwrap();
        assert_eq!(found.state, "closed");
        Ok(())
    }

    #[tokio::test]
    async fn test_find_all_empty_collection() -> Result<()> {
        let store = MemoryStore::new();
        let all: Vec<Ticket> = store.find_all().await?;
        assert!(all.is_empty());
        Ok(())
    }
}
