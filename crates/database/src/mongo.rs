use anyhow::{anyhow, Result};
use futures::StreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::{Client, Database};
use serde_json::{Map, Value};

use crate::{DbObject, DocumentStore, MongoDbEnv};

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(env: &MongoDbEnv) -> Result<Self> {
        let client = Client::with_uri_str(&env.mongodb_uri).await?;
        tracing::info!("[MongoStore] connected, database {}", env.database_name);
        Ok(Self { db: client.database(&env.database_name) })
    }

    pub fn get_db(&self) -> &Database {
        &self.db
    }
}

#[async_trait::async_trait]
impl DocumentStore for MongoStore {
    async fn find_by_id<T: DbObject>(&self, id: &str) -> Result<Option<T>> {
        let col = self.db.collection::<Document>(T::COLLECTION_NAME);
        let doc = col.find_one(doc! { "_id": id }, None).await?;
        match doc {
            Some(d) => Ok(Some(bson::from_document(d)?)),
            None => Ok(None),
        }
    }

    async fn find_all<T: DbObject>(&self) -> Result<Vec<T>> {
        let col = self.db.collection::<Document>(T::COLLECTION_NAME);
        let mut docs = col.find(doc! {}, None).await?;
        let mut vec = Vec::new();
        while let Some(doc) = docs.next().await {
            vec.push(bson::from_document(doc?)?);
        }
        Ok(vec)
    }

    async fn insert<T: DbObject>(&self, obj: &T) -> Result<()> {
        let col = self.db.collection::<Document>(T::COLLECTION_NAME);
        col.insert_one(bson::to_document(obj)?, None)
            .await
            .map_err(|e| anyhow!("[MongoStore::insert] {}: {}", T::COLLECTION_NAME, e))?;
        Ok(())
    }

    async fn replace<T: DbObject>(&self, obj: &T) -> Result<bool> {
        let col = self.db.collection::<Document>(T::COLLECTION_NAME);
        let result = col
            .replace_one(doc! { "_id": obj.get_id() }, bson::to_document(obj)?, None)
            .await?;
        Ok(result.matched_count == 1)
    }

    async fn update_if<T: DbObject>(
        &self,
        id: &str,
        field: &str,
        expected: Value,
        changes: Map<String, Value>,
    ) -> Result<bool> {
        let col = self.db.collection::<Document>(T::COLLECTION_NAME);
        let mut filter = doc! { "_id": id };
        filter.insert(field, bson::to_bson(&expected)?);
        let update = doc! { "$set": bson::to_document(&changes)? };

        let result = col.update_one(filter, update, None).await?;
        Ok(result.matched_count == 1)
    }
}
