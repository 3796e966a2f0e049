mod env;
mod global_state;
mod middleware;
mod response;
mod routes;
mod utils;

use std::time::Duration;

use axum::{middleware::map_response, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use streamsphere_database::DocumentStore;
use streamsphere_runtime::PaymentProvider;

pub use env::ApiServerEnv;
pub use global_state::GlobalState;
pub use middleware::{authenticate, AuthenticatedUser, SessionKey};
pub use response::{timeout_envelope, AppError};
pub use routes::{favorites_routes, genre_routes, misc_routes, payment_routes, user_routes};
pub use utils::{extract_bearer_token, setup_tracing};

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Every route of the service with the shared HTTP layers applied.
pub fn app_router<S: DocumentStore, P: PaymentProvider>(state: GlobalState<S, P>) -> Router {
    app_router_with_timeout(state, Duration::from_secs(REQUEST_TIMEOUT_SECS))
}

pub fn app_router_with_timeout<S: DocumentStore, P: PaymentProvider>(
    state: GlobalState<S, P>,
    request_timeout: Duration,
) -> Router {
    Router::<GlobalState<S, P>>::new()
        .merge(payment_routes(&state))
        .merge(favorites_routes(&state))
        .merge(user_routes(&state))
        .merge(genre_routes::<S, P>())
        .merge(misc_routes::<GlobalState<S, P>>())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(map_response(timeout_envelope))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
