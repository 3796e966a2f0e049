use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("payment provider unreachable: {0}")]
    Unreachable(String),
    #[error("payment provider returned {status}: {description}")]
    Api { status: u16, description: String },
    #[error("unexpected payment provider response: {0}")]
    InvalidResponse(String),
}

/// Upstream that issues orders. Calls are made once; retrying is the caller's decision.
#[async_trait::async_trait]
pub trait PaymentProvider: Clone + Send + Sync + 'static {
    async fn create_order(&self, request: &ProviderOrderRequest) -> Result<ProviderOrder, ProviderError>;
}
