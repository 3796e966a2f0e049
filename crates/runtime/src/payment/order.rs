use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use streamsphere_database::DbObject;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Created,
    Settled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Settled => "settled",
        }
    }
}

/// Local record of an order issued by the payment provider.
///
/// Written once on creation. The only later change is the single
/// `created -> settled` transition; amount and currency never change.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,

    pub amount_minor: i64,
    pub currency: String,
    pub receipt: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    pub status: OrderStatus,
    #[serde(default)]
    pub payment_id: Option<String>,

    pub created_at: i64,
    #[serde(default)]
    pub settled_at: Option<i64>,
}

impl DbObject for PaymentOrder {
    const COLLECTION_NAME: &'static str = "payment_orders";

    fn get_id(&self) -> &str {
        &self.id
    }
}
