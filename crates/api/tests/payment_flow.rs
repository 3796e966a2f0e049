mod common;

use std::time::Duration;

use serde_json::{json, Value};

use streamsphere_checkout::{
    ApiClient, CheckoutConfig, CheckoutInitiator, CheckoutState, CheckoutWidget, PaymentResult, WidgetEvent,
    WidgetOptions,
};
use streamsphere_database::DocumentStore;
use streamsphere_runtime::{payment_signature, OrderStatus, PaymentOrder};

use common::{spawn_app, spawn_app_with_timeout, ProviderMode, TestApp, KEY_SECRET};

struct NoopWidget;

impl CheckoutWidget for NoopWidget {
    fn open(&self, _options: &WidgetOptions) -> anyhow::Result<()> {
        Ok(())
    }
}

async fn create_order(app: &TestApp, body: Value) -> (u16, Value) {
    let response = app
        .client
        .post(app.url("/orders"))
        .bearer_auth(app.token())
        .json(&body)
        .send()
        .await
        .unwrap();
    (response.status().as_u16(), response.json().await.unwrap())
}

async fn verify(app: &TestApp, token: &str, body: Value) -> (u16, Value) {
    let response = app
        .client
        .post(app.url("/payments/verify"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .unwrap();
    (response.status().as_u16(), response.json().await.unwrap())
}

#[tokio::test]
async fn test_checkout_end_to_end() {
    let app = spawn_app(ProviderMode::Healthy).await;
    let api = ApiClient::new(app.base_url.clone(), app.token(), app.client.clone());

    let user = api.current_user().await.unwrap();
    let mut checkout = CheckoutInitiator::new(CheckoutConfig::new("rzp_test_key"), api, NoopWidget).unwrap();
    checkout.prefill(&user);
    checkout.edit_form().amount = "500".into();

    let order_id = checkout.submit().await.unwrap();
    {
        let requests = app.provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, 50000);
        assert_eq!(requests[0].currency, "INR");
        assert!(requests[0].receipt.starts_with("receipt_"));
    }

    let event = WidgetEvent::Completed(PaymentResult {
        payment_id: "pay_1".into(),
        order_id: order_id.clone(),
        signature: payment_signature(KEY_SECRET, &order_id, "pay_1"),
    });
    let state = checkout.handle_widget_event(event).await.unwrap();
    assert_eq!(
        state,
        &CheckoutState::Succeeded {
            order_id: order_id.clone(),
            payment_id: "pay_1".into()
        }
    );

    let form = checkout.form();
    assert_eq!(form.amount, "");
    assert_eq!((form.name.as_str(), form.email.as_str(), form.phone.as_str()), ("A", "a@x.com", "9999999999"));

    let order = app.store.find_by_id::<PaymentOrder>(&order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Settled);
    assert_eq!(order.amount_minor, 50000);
    assert_eq!(order.payment_id.as_deref(), Some("pay_1"));
}

#[tokio::test]
async fn test_dismissed_widget_leaves_order_unsettled() {
    let app = spawn_app(ProviderMode::Healthy).await;
    let api = ApiClient::new(app.base_url.clone(), app.token(), app.client.clone());

    let user = api.current_user().await.unwrap();
    let mut checkout = CheckoutInitiator::new(CheckoutConfig::new("rzp_test_key"), api, NoopWidget).unwrap();
    checkout.prefill(&user);
    checkout.edit_form().amount = "500".into();

    let order_id = checkout.submit().await.unwrap();
    let state = checkout.handle_widget_event(WidgetEvent::Dismissed).await.unwrap();
    assert_eq!(state, &CheckoutState::Idle);

    let order = app.store.find_by_id::<PaymentOrder>(&order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.payment_id, None);
}

#[tokio::test]
async fn test_create_order() {
    let app = spawn_app(ProviderMode::Healthy).await;

    let (status, body) = create_order(
        &app,
        json!({ "amountMinorUnits": 19999, "currency": "INR", "metadata": { "name": "A" } }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["amountMinorUnits"], 19999);
    assert_eq!(body["currency"], "INR");

    let order_id = body["orderId"].as_str().unwrap();
    let order = app.store.find_by_id::<PaymentOrder>(order_id).await.unwrap().unwrap();
    assert_eq!(order.user_id, common::USER_ID);
    assert_eq!(order.metadata.get("name").map(String::as_str), Some("A"));

    // currency defaults when omitted
    let (status, body) = create_order(&app, json!({ "amountMinorUnits": 100 })).await;
    assert_eq!(status, 200);
    assert_eq!(body["currency"], "INR");
}

#[tokio::test]
async fn test_create_order_rejects_bad_input_without_calling_provider() {
    let app = spawn_app(ProviderMode::Healthy).await;

    for body in [
        json!({ "amountMinorUnits": 0, "currency": "INR" }),
        json!({ "amountMinorUnits": -500, "currency": "INR" }),
        json!({ "amountMinorUnits": 500, "currency": "inr" }),
        json!({ "amountMinorUnits": "500" }),
    ] {
        let (status, response) = create_order(&app, body.clone()).await;
        assert_eq!(status, 400, "{}", body);
        assert_eq!(response["success"], false);
        assert!(response["message"].is_string());
    }
    assert_eq!(app.provider.calls(), 0);
}

#[tokio::test]
async fn test_provider_down_is_503_and_stores_nothing() {
    let app = spawn_app(ProviderMode::Down).await;

    let (status, body) = create_order(&app, json!({ "amountMinorUnits": 500, "currency": "INR" })).await;
    assert_eq!(status, 503);
    assert_eq!(body["success"], false);
    assert_eq!(app.provider.calls(), 1);
    assert_eq!(app.store.count::<PaymentOrder>().await, 0);
}

#[tokio::test]
async fn test_stalled_provider_times_out_with_failure_body() {
    let app = spawn_app_with_timeout(ProviderMode::Hanging, Duration::from_millis(100)).await;
    let (status, body) = create_order(&app, json!({ "amountMinorUnits": 500, "currency": "INR" })).await;
    assert_eq!(status, 408);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Request timed out");
    assert_eq!(app.provider.calls(), 1);
    assert_eq!(app.store.count::<PaymentOrder>().await, 0);
}

#[tokio::test]
async fn test_provider_amount_drift_is_refused() {
    let app = spawn_app(ProviderMode::Drifting).await;

    let (status, body) = create_order(&app, json!({ "amountMinorUnits": 500, "currency": "INR" })).await;
    assert_eq!(status, 502);
    assert_eq!(body["success"], false);
    assert_eq!(app.store.count::<PaymentOrder>().await, 0);
}

#[tokio::test]
async fn test_verify_settles_exactly_once() {
    let app = spawn_app(ProviderMode::Healthy).await;
    let (_, body) = create_order(&app, json!({ "amountMinorUnits": 50000, "currency": "INR" })).await;
    let order_id = body["orderId"].as_str().unwrap().to_string();

    let payload = json!({
        "paymentId": "pay_1",
        "orderId": order_id,
        "signature": payment_signature(KEY_SECRET, &order_id, "pay_1"),
    });

    let (status, body) = verify(&app, &app.token(), payload.clone()).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let (status, body) = verify(&app, &app.token(), payload).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["reason"], "already_settled");
}

#[tokio::test]
async fn test_verify_rejects_tampered_signatures() {
    let app = spawn_app(ProviderMode::Healthy).await;
    let (_, body) = create_order(&app, json!({ "amountMinorUnits": 50000, "currency": "INR" })).await;
    let order_id = body["orderId"].as_str().unwrap().to_string();
    let signature = payment_signature(KEY_SECRET, &order_id, "pay_1");

    let mut tampered = signature.clone().into_bytes();
    tampered[10] = if tampered[10] == b'0' { b'1' } else { b'0' };
    let tampered = String::from_utf8(tampered).unwrap();

    for payload in [
        json!({ "paymentId": "pay_1", "orderId": order_id, "signature": tampered }),
        json!({ "paymentId": "pay_2", "orderId": order_id, "signature": signature }),
        json!({ "paymentId": "pay_1", "orderId": order_id, "signature": signature.to_uppercase() }),
        json!({ "paymentId": "pay_1", "orderId": order_id }),
        json!({ "paymentId": "pay_1", "orderId": order_id, "signature": "" }),
    ] {
        let (status, body) = verify(&app, &app.token(), payload.clone()).await;
        assert_eq!(status, 400, "{}", payload);
        assert_eq!(body["reason"], "signature_mismatch", "{}", payload);
    }

    let order = app.store.find_by_id::<PaymentOrder>(&order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Created);
}

#[tokio::test]
async fn test_verify_for_unknown_or_foreign_order() {
    let app = spawn_app(ProviderMode::Healthy).await;
    let (_, body) = create_order(&app, json!({ "amountMinorUnits": 50000, "currency": "INR" })).await;
    let order_id = body["orderId"].as_str().unwrap().to_string();

    let foreign = json!({
        "paymentId": "pay_1",
        "orderId": order_id,
        "signature": payment_signature(KEY_SECRET, &order_id, "pay_1"),
    });
    let (status, body) = verify(&app, &app.token_for("someone-else"), foreign).await;
    assert_eq!(status, 400);
    assert_eq!(body["reason"], "order_not_found");

    let unknown = json!({
        "paymentId": "pay_1",
        "orderId": "order_never_issued",
        "signature": payment_signature(KEY_SECRET, "order_never_issued", "pay_1"),
    });
    let (status, body) = verify(&app, &app.token(), unknown).await;
    assert_eq!(status, 400);
    assert_eq!(body["reason"], "order_not_found");
}
