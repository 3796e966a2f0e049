use std::time::Duration;

use streamsphere_runtime::DEFAULT_CURRENCY;

use crate::CheckoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Provider public key, handed to the widget. Never the private key.
    pub key_id: String,
    pub currency: String,
    pub merchant_name: String,
    pub default_description: String,
    pub theme_color: String,
    /// Upper bound on each backend call made by the initiator.
    pub request_timeout: Duration,
}

pub const CHECKOUT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl CheckoutConfig {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            currency: DEFAULT_CURRENCY.to_string(),
            merchant_name: "StreamSphere".to_string(),
            default_description: "Payment for StreamSphere".to_string(),
            theme_color: "#ffd700".to_string(),
            request_timeout: Duration::from_secs(CHECKOUT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), CheckoutError> {
        if self.key_id.trim().is_empty() {
            return Err(CheckoutError::NotConfigured);
        }
        Ok(())
    }
}
