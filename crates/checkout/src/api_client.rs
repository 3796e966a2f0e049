use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use streamsphere_runtime::{
    CreateOrderRequest, CreateOrderResponse, CurrentUserResponse, FavoriteCheckResponse,
    FavoriteToggleResponse, FavoritesResponse, User, VerifyPaymentRequest, VerifyPaymentResponse,
};

use crate::BackendError;

/// Server side of the checkout: order creation and payment verification.
#[async_trait::async_trait]
pub trait CheckoutBackend: Send + Sync {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreateOrderResponse, BackendError>;
    async fn verify_payment(&self, request: &VerifyPaymentRequest) -> Result<VerifyPaymentResponse, BackendError>;
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
}

pub const API_REQUEST_TIMEOUT_SECS: u64 = 20;

/// HTTP client for the StreamSphere API, authenticated with a session token.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth_token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: auth_token.into(),
        }
    }

    /// Builds a client whose requests give up after the default timeout.
    pub fn connect(base_url: impl Into<String>, auth_token: impl Into<String>) -> Result<Self, BackendError> {
        Self::connect_with_timeout(base_url, auth_token, Duration::from_secs(API_REQUEST_TIMEOUT_SECS))
    }

    pub fn connect_with_timeout(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(base_url, auth_token, client))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", format!("Bearer {}", self.auth_token))
    }

    async fn read_body<R: DeserializeOwned>(response: Response) -> Result<R, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<R>().await?);
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error body".to_string());
        let message = serde_json::from_str::<FailureBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn current_user(&self) -> Result<User, BackendError> {
        let response = self
            .authorized(self.client.get(format!("{}/current/user", self.base_url)))
            .send()
            .await?;
        Ok(Self::read_body::<CurrentUserResponse>(response).await?.user)
    }

    pub async fn toggle_favorite(&self, media_id: &str) -> Result<FavoriteToggleResponse, BackendError> {
        let response = self
            .authorized(self.client.post(format!("{}/favorites/{}", self.base_url, media_id)))
            .send()
            .await?;
        Self::read_body(response).await
    }

    pub async fn check_favorite(&self, media_id: &str) -> Result<bool, BackendError> {
        let response = self
            .authorized(self.client.get(format!("{}/favorites/check/{}", self.base_url, media_id)))
            .send()
            .await?;
        Ok(Self::read_body::<FavoriteCheckResponse>(response).await?.in_favorites)
    }

    pub async fn favorites(&self) -> Result<Vec<String>, BackendError> {
        let response = self
            .authorized(self.client.get(format!("{}/favorites", self.base_url)))
            .send()
            .await?;
        Ok(Self::read_body::<FavoritesResponse>(response).await?.favorites)
    }

    pub async fn genres(&self) -> Result<Vec<String>, BackendError> {
        let response = self
            .client
            .post(format!("{}/genres", self.base_url))
            .send()
            .await?;
        Self::read_body(response).await
    }
}

#[async_trait::async_trait]
impl CheckoutBackend for ApiClient {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreateOrderResponse, BackendError> {
        let response = self
            .authorized(self.client.post(format!("{}/orders", self.base_url)))
            .json(request)
            .send()
            .await?;
        Self::read_body(response).await
    }

    async fn verify_payment(&self, request: &VerifyPaymentRequest) -> Result<VerifyPaymentResponse, BackendError> {
        let response = self
            .authorized(self.client.post(format!("{}/payments/verify", self.base_url)))
            .json(request)
            .send()
            .await?;

        // a rejection is a normal answer, carried on a 400 with a reason
        if response.status() == StatusCode::BAD_REQUEST {
            let text = response.text().await?;
            return match serde_json::from_str::<VerifyPaymentResponse>(&text) {
                Ok(body) if body.reason.is_some() => Ok(body),
                _ => Err(BackendError::Api {
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    message: text,
                }),
            };
        }
        Self::read_body(response).await
    }
}
