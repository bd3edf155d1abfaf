//! The module contains the `WalletItem` type, its kind and its database model.
//!
//! Both income and expenses are represented by `WalletItem`; the stored
//! value is always non-negative and `ItemType` decides the sign it carries
//! into the wallet balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, MoneyCents, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// Income, stored as `EN` ("entrada").
    Income,
    /// Expense, stored as `SD` ("saída").
    Expense,
}

impl ItemType {
    /// Code persisted in the `type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "EN",
            Self::Expense => "SD",
        }
    }

    /// Applies the sign of this kind to a non-negative amount.
    pub(crate) fn signed(self, amount: MoneyCents) -> ResultEngine<MoneyCents> {
        match self {
            Self::Income => Ok(amount),
            Self::Expense => amount
                .checked_neg()
                .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string())),
        }
    }
}

impl TryFrom<&str> for ItemType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "EN" => Ok(Self::Income),
            "SD" => Ok(Self::Expense),
            other => Err(EngineError::InvalidItem(format!(
                "invalid wallet item type: {other}"
            ))),
        }
    }
}

/// A dated ledger entry of a wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletItem {
    pub id: i64,
    /// Owning wallet. Never changes after creation.
    pub wallet_id: i64,
    pub date: NaiveDate,
    pub item_type: ItemType,
    pub description: String,
    pub value: Decimal,
}

impl TryFrom<Model> for WalletItem {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            wallet_id: model.wallet_id,
            date: model.date,
            item_type: ItemType::try_from(model.item_type.as_str())?,
            description: model.description,
            value: MoneyCents::new(model.value).to_decimal(),
        })
    }
}

impl Model {
    /// Signed contribution of this row to its wallet balance.
    pub(crate) fn signed_value(&self) -> ResultEngine<MoneyCents> {
        ItemType::try_from(self.item_type.as_str())?.signed(MoneyCents::new(self.value))
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallet_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub wallet_id: i64,
    pub date: NaiveDate,
    #[sea_orm(column_name = "type")]
    pub item_type: String,
    pub description: String,
    /// Non-negative amount in cents.
    pub value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wallets::Entity",
        from = "Column::WalletId",
        to = "super::wallets::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Wallets,
}

impl Related<super::wallets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
