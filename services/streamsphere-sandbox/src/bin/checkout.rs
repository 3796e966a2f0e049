//! Runs one checkout against a local server, standing in for the hosted widget.
//!
//! The widget's completion signature is produced locally, so this only works
//! against a server configured with the same provider test secret.

use anyhow::Result;
use colored::*;
use tracing::info;
use uuid::Uuid;

use streamsphere_checkout::{
    ApiClient, CheckoutConfig, CheckoutInitiator, CheckoutState, CheckoutWidget, PaymentResult, WidgetEvent,
    WidgetOptions,
};
use streamsphere_common::required_var;
use streamsphere_runtime::{payment_signature, SessionClaims};
use streamsphere_sandbox::config::{BASE_URL, DEMO_USER_ID};

struct TerminalWidget;

impl CheckoutWidget for TerminalWidget {
    fn open(&self, options: &WidgetOptions) -> Result<()> {
        println!(
            "{} {} {} for order {}",
            "Widget opened:".yellow(),
            options.amount,
            options.currency,
            options.order_id.cyan()
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let secret_salt = required_var("SECRET_SALT")?;
    let key_id = required_var("RAZORPAY_KEY_ID")?;
    let key_secret = required_var("RAZORPAY_KEY_SECRET")?;
    let amount = std::env::args().nth(1).unwrap_or_else(|| "500".to_string());

    let token = SessionClaims::new(DEMO_USER_ID).sign(&secret_salt)?;
    let api = ApiClient::connect(BASE_URL, token)?;
    let user = api.current_user().await?;
    info!("Paying as {} ({})", user.name.cyan(), user.id);

    let mut checkout = CheckoutInitiator::new(CheckoutConfig::new(key_id), api, TerminalWidget)?;
    checkout.prefill(&user);
    checkout.edit_form().amount = amount;

    let order_id = checkout.submit().await?;

    let payment_id = format!("pay_{}", Uuid::new_v4().simple());
    let event = WidgetEvent::Completed(PaymentResult {
        signature: payment_signature(&key_secret, &order_id, &payment_id),
        payment_id,
        order_id,
    });

    match checkout.handle_widget_event(event).await? {
        CheckoutState::Succeeded { order_id, payment_id } => {
            println!("{} payment {} settled order {}", "Success:".green(), payment_id, order_id);
        }
        CheckoutState::Failed { error } => {
            println!("{} {}", "Failed:".red(), error.to_string().red());
        }
        other => println!("Checkout ended in {}", other.name()),
    }
    Ok(())
}
