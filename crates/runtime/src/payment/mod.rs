mod order;
mod order_service;
mod provider;
mod verification;

pub use order::{OrderStatus, PaymentOrder};
pub use order_service::{NewOrder, OrderError, OrderService};
pub use provider::{PaymentProvider, ProviderError, ProviderOrder, ProviderOrderRequest};
pub use verification::{
    payment_signature, verify_payment_signature, RejectReason, Verification, VerificationService,
};
