use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{wallet_items, wallets};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/wallet", post(wallets::wallet_new))
        .route("/wallet/{id}", get(wallets::wallet_get))
        .route(
            "/wallet-item",
            post(wallet_items::create).put(wallet_items::update),
        )
        .route(
            "/wallet-item/{id}",
            get(wallet_items::find_between_dates).delete(wallet_items::delete),
        )
        .route("/wallet-item/type/{wallet_id}", get(wallet_items::find_by_type))
        .route("/wallet-item/total/{wallet_id}", get(wallet_items::sum_by_wallet))
        .route("/wallet-item/totals/{wallet_id}", get(wallet_items::totals))
        .with_state(state)
}

/// Build the application router around `engine`.
pub fn app(engine: Engine) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}
