use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use streamsphere_runtime::User;

use crate::ValidationError;

/// Raw payment form contents as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub amount: String,
    pub description: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub amount_minor_units: i64,
    pub description: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Converts a major-unit amount to minor units without rounding.
///
/// Amounts with more than two fractional digits have no exact minor-unit
/// value and are refused.
pub(crate) fn to_minor_units(amount: Decimal) -> Option<i64> {
    if amount <= Decimal::ZERO {
        return None;
    }
    let minor = amount.checked_mul(Decimal::ONE_HUNDRED)?;
    if !minor.fract().is_zero() {
        return None;
    }
    minor.to_i64()
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(value.to_string())
}

impl PaymentForm {
    pub fn prefill(&mut self, user: &User) {
        self.name = user.name.clone();
        self.email = user.email.clone();
        self.phone = user.phone.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<PaymentRequest, ValidationError> {
        let amount = Decimal::from_str(self.amount.trim()).map_err(|_| ValidationError::InvalidAmount)?;
        let amount_minor_units = to_minor_units(amount).ok_or(ValidationError::InvalidAmount)?;

        let description = self.description.trim();
        Ok(PaymentRequest {
            amount,
            amount_minor_units,
            description: (!description.is_empty()).then(|| description.to_string()),
            name: required(&self.name, "name")?,
            email: required(&self.email, "email")?,
            phone: required(&self.phone, "phone")?,
        })
    }

    /// Clears what belongs to one payment and keeps the payer details.
    pub fn reset_after_success(&mut self) {
        self.amount.clear();
        self.description.clear();
    }
}
