mod api_client;
mod config;
mod error;
mod form;
mod initiator;
mod widget;

pub use api_client::{ApiClient, CheckoutBackend};
pub use config::CheckoutConfig;
pub use error::{BackendError, CheckoutError, ValidationError};
pub use form::{PaymentForm, PaymentRequest};
pub use initiator::{CheckoutInitiator, CheckoutState};
pub use widget::{CheckoutWidget, PaymentResult, Prefill, WidgetEvent, WidgetOptions, WidgetTheme};
