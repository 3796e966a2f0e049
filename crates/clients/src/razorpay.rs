use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use streamsphere_common::{optional_var, required_var, EnvVars};
use streamsphere_runtime::{PaymentProvider, ProviderError, ProviderOrder, ProviderOrderRequest};

use crate::{DEFAULT_RAZORPAY_API_BASE, PROVIDER_REQUEST_TIMEOUT_SECS};

pub struct RazorpayEnv {
    pub key_id: String,
    pub key_secret: String,
    pub api_base: String,
}

impl EnvVars for RazorpayEnv {
    fn load() -> Result<Self> {
        Ok(Self {
            key_id: required_var("RAZORPAY_KEY_ID")?,
            key_secret: required_var("RAZORPAY_KEY_SECRET")?,
            api_base: optional_var("RAZORPAY_API_BASE", DEFAULT_RAZORPAY_API_BASE),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    description: String,
}

/// Orders API client. Authenticates with HTTP basic auth over the key pair.
#[derive(Clone)]
pub struct RazorpayClient {
    client: Client,
    api_base: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(env: &RazorpayEnv) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(PROVIDER_REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(env, client))
    }

    pub fn with_client(env: &RazorpayEnv, client: Client) -> Self {
        Self {
            client,
            api_base: env.api_base.trim_end_matches('/').to_string(),
            key_id: env.key_id.clone(),
            key_secret: env.key_secret.clone(),
        }
    }
}

#[async_trait::async_trait]
impl PaymentProvider for RazorpayClient {
    async fn create_order(&self, request: &ProviderOrderRequest) -> Result<ProviderOrder, ProviderError> {
        let response = self
            .client
            .post(format!("{}/orders", self.api_base))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            let description = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.description)
                .unwrap_or(text);
            tracing::error!("[RazorpayClient::create_order] {}: {}", status, description);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                description,
            });
        }

        response
            .json::<ProviderOrder>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))
    }
}
