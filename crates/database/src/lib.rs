mod env;
mod db_object;
mod memory;

#[cfg(feature = "mongodb")]
mod mongo;

pub use env::MongoDbEnv;
pub use db_object::{DbObject, DocumentStore};
pub use memory::MemoryStore;

#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;
