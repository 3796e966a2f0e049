use anyhow::Result;

use streamsphere_clients::{RazorpayClient, RazorpayEnv};
use streamsphere_common::EnvVars;
use streamsphere_database::{MongoDbEnv, MongoStore};
use streamsphere_service_api::{app_router, setup_tracing, ApiServerEnv, GlobalState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let server_env = ApiServerEnv::load()?;
    let mongo_env = MongoDbEnv::load()?;
    let razorpay_env = RazorpayEnv::load()?;

    let store = MongoStore::connect(&mongo_env).await?;
    let provider = RazorpayClient::new(&razorpay_env)?;
    let global_state = GlobalState::new(store, provider, &server_env);

    let app = app_router(global_state);

    let port = server_env.port;
    let listener = tokio::net::TcpListener::bind(format!(":::{port}")).await?;

    tracing::info!("LISTENING ON {port}");
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
