use thiserror::Error;

/// Problems caught before anything goes over the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Please fill in all required fields: {0} is missing")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Payment key is not configured")]
    NotConfigured,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to initiate payment: {0}")]
    ProviderUnavailable(String),
    #[error("Checkout could not be opened: {0}")]
    WidgetUnavailable(String),
    #[error("{0}")]
    PaymentFailed(String),
    #[error("Payment verification failed ({0}). Please start a new payment.")]
    Rejected(String),
    #[error("Payment verification failed: {0}. Please contact support.")]
    VerificationUnavailable(String),
    #[error("Payment completed for a different order")]
    OrderMismatch,
    #[error("A payment is already in progress")]
    Busy,
    #[error("This checkout has already completed")]
    Completed,
    #[error("Unexpected checkout event while {0}")]
    UnexpectedEvent(&'static str),
}

impl CheckoutError {
    /// Whether the user may simply submit again.
    ///
    /// Verification outcomes are final for their order; the user has to start
    /// a fresh payment rather than retry the same one.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Validation(_)
                | CheckoutError::ProviderUnavailable(_)
                | CheckoutError::WidgetUnavailable(_)
                | CheckoutError::PaymentFailed(_)
        )
    }
}
