use axum::{extract::State, routing::post, Json, Router};

use streamsphere_database::DocumentStore;
use streamsphere_runtime::{list_genre_names, PaymentProvider};

use crate::{response::AppError, GlobalState};

pub fn genre_routes<S: DocumentStore, P: PaymentProvider>() -> Router<GlobalState<S, P>> {
    Router::new().route("/genres", post(genres::<S, P>))
}

async fn genres<S: DocumentStore, P: PaymentProvider>(
    State(state): State<GlobalState<S, P>>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = list_genre_names(&state.store).await?;
    Ok(Json(names))
}
