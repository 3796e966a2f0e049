use std::collections::BTreeMap;

use thiserror::Error;
use uuid::Uuid;

use streamsphere_common::get_current_timestamp;
use streamsphere_database::DocumentStore;

use super::{OrderStatus, PaymentOrder, PaymentProvider, ProviderError, ProviderOrderRequest};

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("amount must be a positive number of minor units")]
    InvalidAmount,
    #[error("currency must be a three-letter ISO code")]
    InvalidCurrency,
    #[error("payment provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),
    #[error("payment provider issued {actual_amount} {actual_currency} for order {order_id}, expected {expected_amount} {expected_currency}")]
    AmountMismatch {
        order_id: String,
        expected_amount: i64,
        expected_currency: String,
        actual_amount: i64,
        actual_currency: String,
    },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub amount_minor_units: i64,
    pub currency: String,
    pub metadata: BTreeMap<String, String>,
}

fn is_currency_code(currency: &str) -> bool {
    currency.len() == 3 && currency.bytes().all(|b| b.is_ascii_uppercase())
}

#[derive(Clone)]
pub struct OrderService<S, P> {
    store: S,
    provider: P,
}

impl<S: DocumentStore, P: PaymentProvider> OrderService<S, P> {
    pub fn new(store: S, provider: P) -> Self {
        Self { store, provider }
    }

    /// Creates one order at the provider and records it locally.
    pub async fn create_order(&self, user_id: &str, order: NewOrder) -> Result<PaymentOrder, OrderError> {
        if order.amount_minor_units <= 0 {
            return Err(OrderError::InvalidAmount);
        }
        if !is_currency_code(&order.currency) {
            return Err(OrderError::InvalidCurrency);
        }

        let request = ProviderOrderRequest {
            amount: order.amount_minor_units,
            currency: order.currency.clone(),
            receipt: format!("receipt_{}", Uuid::new_v4().simple()),
            notes: order.metadata.clone(),
        };

        let issued = self.provider.create_order(&request).await.map_err(|e| {
            tracing::warn!("[OrderService::create_order] provider failed for user {}: {}", user_id, e);
            e
        })?;

        if issued.amount != request.amount || issued.currency != request.currency {
            return Err(OrderError::AmountMismatch {
                order_id: issued.id,
                expected_amount: request.amount,
                expected_currency: request.currency,
                actual_amount: issued.amount,
                actual_currency: issued.currency,
            });
        }

        let record = PaymentOrder {
            id: issued.id,
            user_id: user_id.to_string(),
            amount_minor: request.amount,
            currency: request.currency,
            receipt: request.receipt,
            metadata: request.notes,
            status: OrderStatus::Created,
            payment_id: None,
            created_at: get_current_timestamp(),
            settled_at: None,
        };
        self.store.insert(&record).await?;

        tracing::info!(
            "[OrderService::create_order] order {} created for user {}: {} {}",
            record.id, user_id, record.amount_minor, record.currency
        );
        Ok(record)
    }
}
