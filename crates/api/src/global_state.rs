use streamsphere_database::DocumentStore;
use streamsphere_runtime::{OrderService, PaymentProvider, VerificationService};

use crate::{ApiServerEnv, SessionKey};

#[derive(Clone)]
pub struct GlobalState<S, P> {
    pub store: S,
    pub orders: OrderService<S, P>,
    pub verifier: VerificationService<S>,
    pub session_key: SessionKey,
}

impl<S: DocumentStore, P: PaymentProvider> GlobalState<S, P> {
    pub fn new(store: S, provider: P, env: &ApiServerEnv) -> Self {
        Self {
            orders: OrderService::new(store.clone(), provider),
            verifier: VerificationService::new(store.clone(), env.razorpay_key_secret.as_str()),
            session_key: SessionKey::new(env.secret_salt.as_str()),
            store,
        }
    }
}
