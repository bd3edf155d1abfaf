use rust_decimal::Decimal;
use sea_orm::{ActiveValue, ConnectionTrait, TransactionTrait, prelude::*};

use crate::{EngineError, MoneyCents, ResultEngine, Wallet, wallets};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Creates a wallet with an opening value.
    ///
    /// The opening value may be negative (an overdrawn account) but must not
    /// carry more than two fractional digits.
    pub async fn new_wallet(&self, name: &str, value: Decimal) -> ResultEngine<Wallet> {
        let name = normalize_required_text(name, "wallet name")?;
        let value = MoneyCents::try_from(value)?;

        with_tx!(self, |db_tx| {
            let model = wallets::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                value: ActiveValue::Set(value.cents()),
            }
            .insert(&db_tx)
            .await?;

            Ok(Wallet::from(model))
        })
    }

    /// Return a wallet from DB.
    pub async fn wallet(&self, wallet_id: i64) -> ResultEngine<Wallet> {
        let model = self.require_wallet(&self.database, wallet_id).await?;
        Ok(Wallet::from(model))
    }

    pub(super) async fn require_wallet<C: ConnectionTrait>(
        &self,
        db: &C,
        wallet_id: i64,
    ) -> ResultEngine<wallets::Model> {
        wallets::Entity::find_by_id(wallet_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("Wallet with id {wallet_id} not found")))
    }

    /// Moves the stored wallet value by `delta`.
    ///
    /// Fails with [`EngineError::InvalidAmount`] when the new value does not
    /// fit the column; nothing is written in that case.
    pub(super) async fn adjust_wallet_value<C: ConnectionTrait>(
        &self,
        db: &C,
        wallet_id: i64,
        delta: MoneyCents,
    ) -> ResultEngine<()> {
        if delta.is_zero() {
            return Ok(());
        }

        let wallet = self.require_wallet(db, wallet_id).await?;
        let value = MoneyCents::new(wallet.value)
            .checked_add(delta)
            .ok_or_else(|| EngineError::InvalidAmount("wallet value too large".to_string()))?;

        wallets::ActiveModel {
            id: ActiveValue::Unchanged(wallet.id),
            value: ActiveValue::Set(value.cents()),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(())
    }
}
