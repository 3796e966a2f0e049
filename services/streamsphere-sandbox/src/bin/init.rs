use anyhow::Result;
use colored::*;

use streamsphere_common::{required_var, EnvVars};
use streamsphere_database::{DocumentStore, MongoDbEnv, MongoStore};
use streamsphere_runtime::{Genre, User, DEFAULT_GENRES};
use streamsphere_sandbox::config::get_demo_user;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let store = MongoStore::connect(&MongoDbEnv::load()?).await?;

    let mut seeded = 0;
    for name in DEFAULT_GENRES {
        let genre = Genre::new(name);
        if store.find_by_id::<Genre>(&genre.id).await?.is_none() {
            store.insert(&genre).await?;
            seeded += 1;
        }
    }
    println!("{} {} of {} genres", "Seeded".green(), seeded, DEFAULT_GENRES.len());

    let demo = get_demo_user();
    let user = match store.find_by_id::<User>(&demo.id).await? {
        Some(user) => {
            println!("Found existing user {} ({})", user.name.cyan(), user.id);
            user
        }
        None => {
            store.insert(&demo).await?;
            println!("{} user {} ({})", "Created".green(), demo.name.cyan(), demo.id);
            demo
        }
    };

    let token = user.generate_auth_token(&required_var("SECRET_SALT")?)?;
    println!("{}", "Session token:".yellow());
    println!("{}", token);

    println!("Database initialized successfully");
    Ok(())
}
