#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Client;

use streamsphere_database::{DocumentStore, MemoryStore};
use streamsphere_runtime::{
    PaymentProvider, ProviderError, ProviderOrder, ProviderOrderRequest, SessionClaims, User,
};
use streamsphere_service_api::{app_router_with_timeout, ApiServerEnv, GlobalState, REQUEST_TIMEOUT_SECS};

pub const SECRET_SALT: &str = "test-secret-salt";
pub const KEY_SECRET: &str = "test_key_secret";
pub const USER_ID: &str = "u1";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderMode {
    Healthy,
    Down,
    /// Issues orders for one minor unit more than requested.
    Drifting,
    /// Never answers.
    Hanging,
}

#[derive(Clone)]
pub struct FakeProvider {
    pub mode: ProviderMode,
    pub requests: Arc<Mutex<Vec<ProviderOrderRequest>>>,
}

impl FakeProvider {
    pub fn new(mode: ProviderMode) -> Self {
        Self {
            mode,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl PaymentProvider for FakeProvider {
    async fn create_order(&self, request: &ProviderOrderRequest) -> Result<ProviderOrder, ProviderError> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let amount = match self.mode {
            ProviderMode::Down => return Err(ProviderError::Unreachable("connection refused".into())),
            ProviderMode::Hanging => std::future::pending().await,
            ProviderMode::Drifting => request.amount + 1,
            ProviderMode::Healthy => request.amount,
        };
        Ok(ProviderOrder {
            id: format!("order_test{}", count),
            amount,
            currency: request.currency.clone(),
            receipt: Some(request.receipt.clone()),
            status: Some("created".into()),
        })
    }
}

pub struct TestApp {
    pub base_url: String,
    pub store: MemoryStore,
    pub provider: FakeProvider,
    pub client: Client,
}

impl TestApp {
    pub fn token_for(&self, user_id: &str) -> String {
        SessionClaims::new(user_id).sign(SECRET_SALT).unwrap()
    }

    pub fn token(&self) -> String {
        self.token_for(USER_ID)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn spawn_app(mode: ProviderMode) -> TestApp {
    spawn_app_with_timeout(mode, Duration::from_secs(REQUEST_TIMEOUT_SECS)).await
}

pub async fn spawn_app_with_timeout(mode: ProviderMode, request_timeout: Duration) -> TestApp {
    let store = MemoryStore::new();
    let mut user = User::new(USER_ID, "A", "a@x.com");
    user.phone = Some("9999999999".into());
    store.insert(&user).await.unwrap();

    let provider = FakeProvider::new(mode);
    let env = ApiServerEnv {
        secret_salt: SECRET_SALT.into(),
        razorpay_key_secret: KEY_SECRET.into(),
        port: 0,
    };
    let app = app_router_with_timeout(GlobalState::new(store.clone(), provider.clone(), &env), request_timeout);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        store,
        provider,
        client: Client::new(),
    }
}
