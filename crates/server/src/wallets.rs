//! Wallets API endpoints.

use api_types::{
    Response,
    wallet::{Wallet, WalletNew},
};
use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn to_view(wallet: engine::Wallet) -> Wallet {
    Wallet {
        id: wallet.id,
        name: wallet.name,
        value: wallet.value,
    }
}

pub async fn wallet_new(
    State(state): State<ServerState>,
    payload: Result<Json<WalletNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Response<Wallet>>), ServerError> {
    let Json(payload) = payload?;
    let wallet = state.engine.new_wallet(&payload.name, payload.value).await?;

    Ok((StatusCode::CREATED, Json(Response::data(to_view(wallet)))))
}

pub async fn wallet_get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Response<Wallet>>, ServerError> {
    let Path(id) = id?;
    let wallet = state.engine.wallet(id).await?;

    Ok(Json(Response::data(to_view(wallet))))
}
