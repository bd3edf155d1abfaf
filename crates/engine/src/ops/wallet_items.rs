use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};

use crate::{EngineError, ItemType, MoneyCents, ResultEngine, WalletItem, wallet_items};

use super::{Engine, normalize_required_text, with_tx};

/// Data needed to create a wallet item.
#[derive(Clone, Debug)]
pub struct NewWalletItem {
    pub wallet_id: i64,
    pub date: NaiveDate,
    pub item_type: ItemType,
    pub description: String,
    pub value: Decimal,
}

/// Replaces every field of an existing wallet item.
///
/// `wallet_id` must match the stored wallet: items never move between wallets.
#[derive(Clone, Debug)]
pub struct UpdateWalletItemCmd {
    pub id: i64,
    pub wallet_id: i64,
    pub date: NaiveDate,
    pub item_type: ItemType,
    pub description: String,
    pub value: Decimal,
}

/// One page of a paginated query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
    /// Zero-based page number.
    pub number: u64,
    pub size: u64,
}

/// Income and expense totals of a wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalletTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub net: Decimal,
}

/// Validate an item amount and convert it to cents.
fn item_value(value: Decimal) -> ResultEngine<MoneyCents> {
    let cents = MoneyCents::try_from(value)?;
    if cents.is_negative() {
        return Err(EngineError::InvalidAmount("value must be >= 0".to_string()));
    }
    Ok(cents)
}

impl Engine {
    /// Persists a new wallet item and applies it to the wallet value.
    pub async fn save_wallet_item(&self, item: NewWalletItem) -> ResultEngine<WalletItem> {
        let value = item_value(item.value)?;
        let description = normalize_required_text(&item.description, "description")?;
        let signed = item.item_type.signed(value)?;

        with_tx!(self, |db_tx| {
            self.require_wallet(&db_tx, item.wallet_id).await?;

            let model = wallet_items::ActiveModel {
                id: ActiveValue::NotSet,
                wallet_id: ActiveValue::Set(item.wallet_id),
                date: ActiveValue::Set(item.date),
                item_type: ActiveValue::Set(item.item_type.as_str().to_string()),
                description: ActiveValue::Set(description),
                value: ActiveValue::Set(value.cents()),
            }
            .insert(&db_tx)
            .await?;

            self.adjust_wallet_value(&db_tx, item.wallet_id, signed)
                .await?;

            WalletItem::try_from(model)
        })
    }

    /// Looks up a wallet item by id.
    pub async fn wallet_item(&self, id: i64) -> ResultEngine<Option<WalletItem>> {
        wallet_items::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(WalletItem::try_from)
            .transpose()
    }

    /// Updates an existing wallet item.
    ///
    /// Fails with [`EngineError::InvalidItem`] if the item does not exist and
    /// with [`EngineError::WalletChange`] if the command targets another wallet.
    /// In both cases nothing is written.
    pub async fn update_wallet_item(&self, cmd: UpdateWalletItemCmd) -> ResultEngine<WalletItem> {
        let value = item_value(cmd.value)?;
        let description = normalize_required_text(&cmd.description, "description")?;
        let new_signed = cmd.item_type.signed(value)?;

        with_tx!(self, |db_tx| {
            let existing = wallet_items::Entity::find_by_id(cmd.id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::InvalidItem("WalletItem not found".to_string()))?;
            if existing.wallet_id != cmd.wallet_id {
                return Err(EngineError::WalletChange);
            }

            let delta = new_signed
                .checked_sub(existing.signed_value()?)
                .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;

            let model = wallet_items::ActiveModel {
                id: ActiveValue::Unchanged(existing.id),
                wallet_id: ActiveValue::Unchanged(existing.wallet_id),
                date: ActiveValue::Set(cmd.date),
                item_type: ActiveValue::Set(cmd.item_type.as_str().to_string()),
                description: ActiveValue::Set(description),
                value: ActiveValue::Set(value.cents()),
            }
            .update(&db_tx)
            .await?;

            self.adjust_wallet_value(&db_tx, existing.wallet_id, delta)
                .await?;

            WalletItem::try_from(model)
        })
    }

    /// Deletes a wallet item and removes it from the wallet value.
    pub async fn delete_wallet_item(&self, id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let existing = wallet_items::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| {
                    EngineError::KeyNotFound(format!("WalletItem with id {id} not found"))
                })?;
            let reverted = existing
                .signed_value()?
                .checked_neg()
                .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;

            wallet_items::Entity::delete_by_id(id).exec(&db_tx).await?;
            self.adjust_wallet_value(&db_tx, existing.wallet_id, reverted)
                .await?;

            Ok(())
        })
    }

    /// Lists the items of a wallet dated within `[start, end]`, ordered by id.
    ///
    /// `page` is zero-based; a page past the end is empty. A page whose
    /// row offset does not fit an SQL integer is rejected with [`EngineError::InvalidRange`].
    pub async fn wallet_items_between(
        &self,
        wallet_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        page: u64,
    ) -> ResultEngine<Page<WalletItem>> {
        if start > end {
            return Err(EngineError::InvalidRange(
                "start date must not be after end date".to_string(),
            ));
        }
        let offset = page
            .checked_mul(self.items_per_page)
            .and_then(|offset| i64::try_from(offset).ok());
        if offset.is_none() {
            return Err(EngineError::InvalidRange(format!("page {page} is out of range")));
        }
        self.require_wallet(&self.database, wallet_id).await?;

        let paginator = wallet_items::Entity::find()
            .filter(wallet_items::Column::WalletId.eq(wallet_id))
            .filter(wallet_items::Column::Date.between(start, end))
            .order_by_asc(wallet_items::Column::Id)
            .paginate(&self.database, self.items_per_page);

        let totals = paginator.num_items_and_pages().await?;
        let items = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(WalletItem::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        Ok(Page {
            items,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
            number: page,
            size: self.items_per_page,
        })
    }

    /// Lists every item of a wallet with the given kind.
    pub async fn wallet_items_by_type(
        &self,
        wallet_id: i64,
        item_type: ItemType,
    ) -> ResultEngine<Vec<WalletItem>> {
        self.require_wallet(&self.database, wallet_id).await?;

        wallet_items::Entity::find()
            .filter(wallet_items::Column::WalletId.eq(wallet_id))
            .filter(wallet_items::Column::ItemType.eq(item_type.as_str()))
            .order_by_asc(wallet_items::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(WalletItem::try_from)
            .collect()
    }

    /// Sum of the values of every item of a wallet, regardless of kind.
    pub async fn sum_wallet_items(&self, wallet_id: i64) -> ResultEngine<Decimal> {
        self.require_wallet(&self.database, wallet_id).await?;

        let total: Option<i64> = wallet_items::Entity::find()
            .select_only()
            .column_as(wallet_items::Column::Value.sum(), "total")
            .filter(wallet_items::Column::WalletId.eq(wallet_id))
            .into_tuple::<Option<i64>>()
            .one(&self.database)
            .await?
            .flatten();

        Ok(MoneyCents::new(total.unwrap_or_default()).to_decimal())
    }

    /// Income and expense totals of a wallet.
    pub async fn wallet_item_totals(&self, wallet_id: i64) -> ResultEngine<WalletTotals> {
        self.require_wallet(&self.database, wallet_id).await?;

        let rows: Vec<(String, Option<i64>)> = wallet_items::Entity::find()
            .select_only()
            .column(wallet_items::Column::ItemType)
            .column_as(wallet_items::Column::Value.sum(), "total")
            .filter(wallet_items::Column::WalletId.eq(wallet_id))
            .group_by(wallet_items::Column::ItemType)
            .into_tuple()
            .all(&self.database)
            .await?;

        let (mut income, mut expense) = (0i64, 0i64);
        for (code, total) in rows {
            match ItemType::try_from(code.as_str())? {
                ItemType::Income => income = total.unwrap_or_default(),
                ItemType::Expense => expense = total.unwrap_or_default(),
            }
        }
        let net = income
            .checked_sub(expense)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;

        Ok(WalletTotals {
            total_income: MoneyCents::new(income).to_decimal(),
            total_expense: MoneyCents::new(expense).to_decimal(),
            net: MoneyCents::new(net).to_decimal(),
        })
    }
}
