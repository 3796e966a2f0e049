use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetTheme {
    pub color: String,
}

/// Options the hosted checkout widget is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetOptions {
    pub key: String,
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: WidgetTheme,
}

/// What the widget hands back on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    #[serde(alias = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(alias = "razorpay_order_id")]
    pub order_id: String,
    #[serde(alias = "razorpay_signature")]
    pub signature: String,
}

/// The three mutually exclusive outcomes of an opened widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    Completed(PaymentResult),
    Failed { error_description: Option<String> },
    Dismissed,
}

pub trait CheckoutWidget: Send + Sync {
    fn open(&self, options: &WidgetOptions) -> anyhow::Result<()>;
}
