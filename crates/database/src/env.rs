use anyhow::Result;

use streamsphere_common::{optional_var, required_var, EnvVars};

pub struct MongoDbEnv {
    pub mongodb_uri: String,
    pub database_name: String,
}

impl EnvVars for MongoDbEnv {
    fn load() -> Result<Self> {
        Ok(Self {
            mongodb_uri: required_var("MONGODB_URI")?,
            database_name: optional_var("MONGODB_DATABASE", "streamsphere"),
        })
    }
}
