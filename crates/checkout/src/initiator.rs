use std::collections::BTreeMap;

use tokio::time::timeout;

use streamsphere_runtime::{CreateOrderRequest, User, VerifyPaymentRequest};

use crate::{
    CheckoutBackend, CheckoutConfig, CheckoutError, CheckoutWidget, PaymentForm, PaymentRequest,
    Prefill, WidgetEvent, WidgetOptions, WidgetTheme,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Submitting,
    AwaitingWidget { order_id: String, amount_minor_units: i64 },
    Verifying { order_id: String },
    Succeeded { order_id: String, payment_id: String },
    Failed { error: CheckoutError },
}

impl CheckoutState {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Submitting => "submitting",
            CheckoutState::AwaitingWidget { .. } => "awaiting_widget",
            CheckoutState::Verifying { .. } => "verifying",
            CheckoutState::Succeeded { .. } => "succeeded",
            CheckoutState::Failed { .. } => "failed",
        }
    }

    /// True while a network call or the widget owns the payment.
    pub fn is_processing(&self) -> bool {
        matches!(
            self,
            CheckoutState::Submitting | CheckoutState::AwaitingWidget { .. } | CheckoutState::Verifying { .. }
        )
    }
}

/// Drives one payment from form submission to a verified settlement.
///
/// Every path out of `Submitting` or `Verifying` lands in `Idle`, `Failed` or
/// `Succeeded`. Nothing is retried automatically; after a failure the user
/// submits again, which creates a fresh order.
pub struct CheckoutInitiator<B, W> {
    config: CheckoutConfig,
    backend: B,
    widget: W,
    form: PaymentForm,
    state: CheckoutState,
}

impl<B: CheckoutBackend, W: CheckoutWidget> CheckoutInitiator<B, W> {
    pub fn new(config: CheckoutConfig, backend: B, widget: W) -> Result<Self, CheckoutError> {
        config.validate()?;
        Ok(Self {
            config,
            backend,
            widget,
            form: PaymentForm::default(),
            state: CheckoutState::Idle,
        })
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn form(&self) -> &PaymentForm {
        &self.form
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Mutable access to the form. Editing after a failure clears the error.
    pub fn edit_form(&mut self) -> &mut PaymentForm {
        if matches!(self.state, CheckoutState::Failed { .. }) {
            self.state = CheckoutState::Idle;
        }
        &mut self.form
    }

    pub fn prefill(&mut self, user: &User) {
        self.form.prefill(user);
    }

    pub fn error(&self) -> Option<&CheckoutError> {
        match &self.state {
            CheckoutState::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// Dismisses a displayed failure.
    pub fn acknowledge(&mut self) {
        if matches!(self.state, CheckoutState::Failed { .. }) {
            self.state = CheckoutState::Idle;
        }
    }

    /// Abandons an in-flight payment.
    ///
    /// Needed when a caller drops a pending `submit` or `handle_widget_event`.
    /// An interrupted verification has an unknown outcome, so it ends in a
    /// non-retryable failure rather than `Idle`.
    pub fn abort(&mut self) {
        match self.state {
            CheckoutState::Submitting | CheckoutState::AwaitingWidget { .. } => {
                tracing::info!("[checkout] {} aborted", self.state.name());
                self.state = CheckoutState::Idle;
            }
            CheckoutState::Verifying { .. } => {
                self.fail(CheckoutError::VerificationUnavailable(
                    "verification was interrupted".to_string(),
                ));
            }
            _ => {}
        }
    }

    fn fail(&mut self, error: CheckoutError) -> CheckoutError {
        tracing::warn!("[checkout] {} -> failed: {}", self.state.name(), error);
        self.state = CheckoutState::Failed { error: error.clone() };
        error
    }

    fn order_request(&self, request: &PaymentRequest) -> CreateOrderRequest {
        let mut metadata = BTreeMap::new();
        if let Some(description) = &request.description {
            metadata.insert("description".to_string(), description.clone());
        }
        metadata.insert("name".to_string(), request.name.clone());
        metadata.insert("email".to_string(), request.email.clone());
        metadata.insert("phone".to_string(), request.phone.clone());

        CreateOrderRequest {
            amount_minor_units: request.amount_minor_units,
            currency: self.config.currency.clone(),
            metadata,
        }
    }

    fn widget_options(&self, request: &PaymentRequest, order_id: &str) -> WidgetOptions {
        WidgetOptions {
            key: self.config.key_id.clone(),
            amount: request.amount_minor_units,
            currency: self.config.currency.clone(),
            name: self.config.merchant_name.clone(),
            description: request
                .description
                .clone()
                .unwrap_or_else(|| self.config.default_description.clone()),
            order_id: order_id.to_string(),
            prefill: Prefill {
                name: request.name.clone(),
                email: request.email.clone(),
                contact: request.phone.clone(),
            },
            theme: WidgetTheme {
                color: self.config.theme_color.clone(),
            },
        }
    }

    /// Validates the form, creates an order and opens the widget on it.
    ///
    /// Returns the order id the widget was opened with. Validation failures
    /// never reach the backend.
    pub async fn submit(&mut self) -> Result<String, CheckoutError> {
        match &self.state {
            CheckoutState::Idle | CheckoutState::Failed { .. } => {}
            CheckoutState::Succeeded { .. } => return Err(CheckoutError::Completed),
            _ => return Err(CheckoutError::Busy),
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e.into())),
        };

        self.state = CheckoutState::Submitting;
        let order_request = self.order_request(&request);
        tracing::info!(
            "[checkout] creating order for {} {}",
            order_request.amount_minor_units,
            order_request.currency
        );

        let response = match timeout(self.config.request_timeout, self.backend.create_order(&order_request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(self.fail(CheckoutError::ProviderUnavailable(e.to_string()))),
            Err(_) => {
                return Err(self.fail(CheckoutError::ProviderUnavailable(
                    "order request timed out".to_string(),
                )))
            }
        };

        let order_id = match response.order_id {
            Some(order_id) if response.success && !order_id.is_empty() => order_id,
            _ => {
                let message = response
                    .message
                    .unwrap_or_else(|| "order was not created".to_string());
                return Err(self.fail(CheckoutError::ProviderUnavailable(message)));
            }
        };

        if response
            .amount_minor_units
            .is_some_and(|amount| amount != request.amount_minor_units)
        {
            return Err(self.fail(CheckoutError::ProviderUnavailable(
                "order amount does not match the payment".to_string(),
            )));
        }

        let options = self.widget_options(&request, &order_id);
        if let Err(e) = self.widget.open(&options) {
            return Err(self.fail(CheckoutError::WidgetUnavailable(e.to_string())));
        }

        tracing::info!("[checkout] widget opened for order {}", order_id);
        self.state = CheckoutState::AwaitingWidget {
            order_id: order_id.clone(),
            amount_minor_units: request.amount_minor_units,
        };
        Ok(order_id)
    }

    /// Applies the single outcome of an opened widget.
    ///
    /// Only accepted while awaiting the widget; any other event is refused
    /// and leaves the state untouched. Outcomes, including failures, are
    /// reported through the returned state.
    pub async fn handle_widget_event(&mut self, event: WidgetEvent) -> Result<&CheckoutState, CheckoutError> {
        let order_id = match &self.state {
            CheckoutState::AwaitingWidget { order_id, .. } => order_id.clone(),
            other => return Err(CheckoutError::UnexpectedEvent(other.name())),
        };

        match event {
            WidgetEvent::Dismissed => {
                tracing::info!("[checkout] widget dismissed for order {}", order_id);
                self.state = CheckoutState::Idle;
            }
            WidgetEvent::Failed { error_description } => {
                let message = error_description.unwrap_or_else(|| "Payment failed".to_string());
                self.fail(CheckoutError::PaymentFailed(message));
            }
            WidgetEvent::Completed(result) => {
                if result.order_id != order_id {
                    self.fail(CheckoutError::OrderMismatch);
                    return Ok(&self.state);
                }

                self.state = CheckoutState::Verifying {
                    order_id: order_id.clone(),
                };
                let request = VerifyPaymentRequest {
                    payment_id: result.payment_id.clone(),
                    order_id: result.order_id,
                    signature: result.signature,
                };

                match timeout(self.config.request_timeout, self.backend.verify_payment(&request)).await {
                    Ok(Ok(response)) if response.success => {
                        tracing::info!("[checkout] payment {} verified for order {}", result.payment_id, order_id);
                        self.form.reset_after_success();
                        self.state = CheckoutState::Succeeded {
                            order_id,
                            payment_id: result.payment_id,
                        };
                    }
                    Ok(Ok(response)) => {
                        let reason = response
                            .reason
                            .or(response.message)
                            .unwrap_or_else(|| "rejected".to_string());
                        self.fail(CheckoutError::Rejected(reason));
                    }
                    Ok(Err(e)) => {
                        self.fail(CheckoutError::VerificationUnavailable(e.to_string()));
                    }
                    Err(_) => {
                        self.fail(CheckoutError::VerificationUnavailable(
                            "verification timed out".to_string(),
                        ));
                    }
                }
            }
        }

        Ok(&self.state)
    }
}
