//! Wallet items API endpoints.

use api_types::{
    Page, Response,
    wallet_item::{DateRange, ItemType as ApiItemType, Totals, TypeFilter, WalletItem},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use engine::{EngineError, ItemType, NewWalletItem, UpdateWalletItemCmd};
use rust_decimal::Decimal;

use crate::{ServerError, server::ServerState};

fn map_type(item_type: ItemType) -> ApiItemType {
    match item_type {
        ItemType::Income => ApiItemType::Income,
        ItemType::Expense => ApiItemType::Expense,
    }
}

fn map_api_type(item_type: ApiItemType) -> ItemType {
    match item_type {
        ApiItemType::Income => ItemType::Income,
        ApiItemType::Expense => ItemType::Expense,
    }
}

fn to_view(item: engine::WalletItem) -> WalletItem {
    WalletItem {
        id: Some(item.id),
        wallet: item.wallet_id,
        date: item.date,
        item_type: map_type(item.item_type),
        description: item.description,
        value: item.value,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<WalletItem>, JsonRejection>,
) -> Result<(StatusCode, Json<Response<WalletItem>>), ServerError> {
    let Json(payload) = payload?;
    let item = state
        .engine
        .save_wallet_item(NewWalletItem {
            wallet_id: payload.wallet,
            date: payload.date,
            item_type: map_api_type(payload.item_type),
            description: payload.description,
            value: payload.value,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Response::data(to_view(item)))))
}

pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<WalletItem>, JsonRejection>,
) -> Result<Json<Response<WalletItem>>, ServerError> {
    let Json(payload) = payload?;
    let id = payload
        .id
        .ok_or_else(|| EngineError::InvalidItem("WalletItem not found".to_string()))?;

    let item = state
        .engine
        .update_wallet_item(UpdateWalletItemCmd {
            id,
            wallet_id: payload.wallet,
            date: payload.date,
            item_type: map_api_type(payload.item_type),
            description: payload.description,
            value: payload.value,
        })
        .await?;

    Ok(Json(Response::data(to_view(item))))
}

pub async fn find_between_dates(
    State(state): State<ServerState>,
    wallet_id: Result<Path<i64>, PathRejection>,
    range: Result<Query<DateRange>, QueryRejection>,
) -> Result<Json<Response<Page<WalletItem>>>, ServerError> {
    let Path(wallet_id) = wallet_id?;
    let Query(range) = range?;

    let page = state
        .engine
        .wallet_items_between(wallet_id, range.start_date, range.end_date, range.page)
        .await?;

    Ok(Json(Response::data(Page {
        content: page.items.into_iter().map(to_view).collect(),
        total_elements: page.total_items,
        total_pages: page.total_pages,
        number: page.number,
        size: page.size,
    })))
}

pub async fn find_by_type(
    State(state): State<ServerState>,
    wallet_id: Result<Path<i64>, PathRejection>,
    filter: Result<Query<TypeFilter>, QueryRejection>,
) -> Result<Json<Response<Vec<WalletItem>>>, ServerError> {
    let Path(wallet_id) = wallet_id?;
    let Query(filter) = filter?;

    let items = state
        .engine
        .wallet_items_by_type(wallet_id, map_api_type(filter.item_type))
        .await?;

    Ok(Json(Response::data(
        items.into_iter().map(to_view).collect(),
    )))
}

pub async fn sum_by_wallet(
    State(state): State<ServerState>,
    wallet_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Response<Decimal>>, ServerError> {
    let Path(wallet_id) = wallet_id?;
    let total = state.engine.sum_wallet_items(wallet_id).await?;

    Ok(Json(Response::data(total)))
}

pub async fn totals(
    State(state): State<ServerState>,
    wallet_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Response<Totals>>, ServerError> {
    let Path(wallet_id) = wallet_id?;
    let totals = state.engine.wallet_item_totals(wallet_id).await?;

    Ok(Json(Response::data(Totals {
        total_income: totals.total_income,
        total_expense: totals.total_expense,
        net: totals.net,
    })))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Response<String>>, ServerError> {
    let Path(id) = id?;
    state.engine.delete_wallet_item(id).await?;
    tracing::debug!("deleted wallet item {id}");

    Ok(Json(Response::data(format!(
        "WalletItem with id {id} deleted successfully"
    ))))
}
