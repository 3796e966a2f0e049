use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    http::StatusCode,
    middleware,
    routing::post,
    Json, Router,
};

use streamsphere_database::DocumentStore;
use streamsphere_runtime::{
    CreateOrderRequest, CreateOrderResponse, NewOrder, OrderError, PaymentProvider, RejectReason,
    Verification, VerifyPaymentRequest, VerifyPaymentResponse,
};

use crate::{authenticate, response::AppError, AuthenticatedUser, GlobalState};

pub fn payment_routes<S: DocumentStore, P: PaymentProvider>(state: &GlobalState<S, P>) -> Router<GlobalState<S, P>> {
    Router::new()
        .route("/orders",
            post(create_order::<S, P>)
        )
        .route("/payments/verify",
            post(verify_payment::<S, P>)
        )
        .route_layer(middleware::from_fn_with_state(state.session_key.clone(), authenticate))
}

fn order_error(err: OrderError) -> AppError {
    match err {
        OrderError::InvalidAmount | OrderError::InvalidCurrency => {
            AppError::new(StatusCode::BAD_REQUEST, err.into())
        }
        OrderError::ProviderUnavailable(e) => {
            tracing::warn!("[create_order] provider unavailable: {}", e);
            AppError::message(
                StatusCode::SERVICE_UNAVAILABLE,
                "Payment provider is unavailable, please try again",
            )
        }
        OrderError::AmountMismatch { .. } => {
            tracing::error!("[create_order] {}", err);
            AppError::message(StatusCode::BAD_GATEWAY, "Payment provider returned an inconsistent order")
        }
        OrderError::Store(e) => AppError::new(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

async fn create_order<S: DocumentStore, P: PaymentProvider>(
    State(state): State<GlobalState<S, P>>,
    Extension(auth): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::message(StatusCode::BAD_REQUEST, &e.body_text()))?;

    let order = state
        .orders
        .create_order(
            &auth.user_id,
            NewOrder {
                amount_minor_units: payload.amount_minor_units,
                currency: payload.currency,
                metadata: payload.metadata,
            },
        )
        .await
        .map_err(order_error)?;

    Ok(Json(CreateOrderResponse {
        success: true,
        message: Some("Order created".to_string()),
        order_id: Some(order.id),
        amount_minor_units: Some(order.amount_minor),
        currency: Some(order.currency),
    }))
}

fn rejected(reason: RejectReason) -> (StatusCode, Json<VerifyPaymentResponse>) {
    let message = match reason {
        RejectReason::SignatureMismatch => "Payment signature is invalid",
        RejectReason::AlreadySettled => "Payment was already verified",
        RejectReason::OrderNotFound => "Order not found",
    };
    (
        StatusCode::BAD_REQUEST,
        Json(VerifyPaymentResponse {
            success: false,
            reason: Some(reason.as_str().to_string()),
            message: Some(message.to_string()),
        }),
    )
}

async fn verify_payment<S: DocumentStore, P: PaymentProvider>(
    State(state): State<GlobalState<S, P>>,
    Extension(auth): Extension<AuthenticatedUser>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VerifyPaymentResponse>), AppError> {
    // a body that does not even parse cannot carry a valid signature
    let Ok(Json(payload)) = payload else {
        return Ok(rejected(RejectReason::SignatureMismatch));
    };

    let outcome = state
        .verifier
        .verify(&auth.user_id, &payload.payment_id, &payload.order_id, &payload.signature)
        .await?;

    match outcome {
        Verification::Verified => Ok((
            StatusCode::OK,
            Json(VerifyPaymentResponse {
                success: true,
                reason: None,
                message: Some("Payment verified successfully".to_string()),
            }),
        )),
        Verification::Rejected(reason) => {
            tracing::info!("[verify_payment] order {} rejected: {}", payload.order_id, reason);
            Ok(rejected(reason))
        }
    }
}
