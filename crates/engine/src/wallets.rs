//! The module contains `Wallet` struct and its database model.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::MoneyCents;

/// A wallet.
///
/// A named balance. `value` is kept equal to the opening value plus the
/// income minus the expenses of its items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wallet {
    pub id: i64,
    pub name: String,
    pub value: Decimal,
}

impl From<Model> for Wallet {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            value: MoneyCents::new(model.value).to_decimal(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Balance in cents.
    pub value: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wallet_items::Entity")]
    WalletItems,
}

impl Related<super::wallet_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WalletItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
