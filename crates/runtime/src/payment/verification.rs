use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};

use streamsphere_common::{get_current_timestamp, hmac_sha256_hex, verify_hmac_sha256_hex};
use streamsphere_database::DocumentStore;

use super::{OrderStatus, PaymentOrder};

fn signed_payload(order_id: &str, payment_id: &str) -> String {
    format!("{}|{}", order_id, payment_id)
}

/// Signature the provider attaches to a completed checkout.
pub fn payment_signature(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    hmac_sha256_hex(key_secret.as_bytes(), signed_payload(order_id, payment_id).as_bytes())
}

pub fn verify_payment_signature(key_secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    verify_hmac_sha256_hex(
        key_secret.as_bytes(),
        signed_payload(order_id, payment_id).as_bytes(),
        signature,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    SignatureMismatch,
    AlreadySettled,
    OrderNotFound,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::SignatureMismatch => "signature_mismatch",
            RejectReason::AlreadySettled => "already_settled",
            RejectReason::OrderNotFound => "order_not_found",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Verified,
    Rejected(RejectReason),
}

#[derive(Clone)]
pub struct VerificationService<S> {
    store: S,
    key_secret: Arc<str>,
}

impl<S: DocumentStore> VerificationService<S> {
    pub fn new(store: S, key_secret: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            key_secret: key_secret.into(),
        }
    }

    /// Checks a checkout result and settles its order exactly once.
    ///
    /// Bad input of any shape is a `Rejected`, never an error. Errors only come
    /// from the store.
    pub async fn verify(
        &self,
        user_id: &str,
        payment_id: &str,
        order_id: &str,
        signature: &str,
    ) -> Result<Verification> {
        if payment_id.is_empty()
            || order_id.is_empty()
            || !verify_payment_signature(&self.key_secret, order_id, payment_id, signature)
        {
            tracing::warn!("[VerificationService::verify] signature mismatch for order {}", order_id);
            return Ok(Verification::Rejected(RejectReason::SignatureMismatch));
        }

        let order = match self.store.find_by_id::<PaymentOrder>(order_id).await? {
            Some(order) if order.user_id == user_id => order,
            _ => {
                tracing::warn!(
                    "[VerificationService::verify] order {} not issued to user {}",
                    order_id, user_id
                );
                return Ok(Verification::Rejected(RejectReason::OrderNotFound));
            }
        };

        if order.status == OrderStatus::Settled {
            return Ok(Verification::Rejected(RejectReason::AlreadySettled));
        }

        let mut changes = Map::new();
        changes.insert("status".to_string(), json!(OrderStatus::Settled.as_str()));
        changes.insert("payment_id".to_string(), json!(payment_id));
        changes.insert("settled_at".to_string(), json!(get_current_timestamp()));

        // a concurrent verification may have settled it between the read and here
        let settled = self
            .store
            .update_if::<PaymentOrder>(order_id, "status", json!(OrderStatus::Created.as_str()), changes)
            .await?;
        if !settled {
            return Ok(Verification::Rejected(RejectReason::AlreadySettled));
        }

        tracing::info!(
            "[VerificationService::verify] order {} settled by payment {}",
            order_id, payment_id
        );
        Ok(Verification::Verified)
    }
}
