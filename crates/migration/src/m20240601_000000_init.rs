//! Initial schema migration.
//!
//! - `wallet`: named balances
//! - `wallet_item`: dated income/expense entries of a wallet
//!
//! Money columns hold integer minor units (cents).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Wallet {
    Table,
    Id,
    Name,
    Value,
}

#[derive(Iden)]
enum WalletItem {
    Table,
    Id,
    WalletId,
    Date,
    Type,
    Description,
    Value,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wallet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallet::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wallet::Name).string().not_null())
                    .col(ColumnDef::new(Wallet::Value).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WalletItem::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WalletItem::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WalletItem::WalletId).integer().not_null())
                    .col(ColumnDef::new(WalletItem::Date).date().not_null())
                    .col(ColumnDef::new(WalletItem::Type).string_len(2).not_null())
                    .col(ColumnDef::new(WalletItem::Description).string().not_null())
                    .col(ColumnDef::new(WalletItem::Value).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-wallet_item-wallet_id")
                            .from(WalletItem::Table, WalletItem::WalletId)
                            .to(Wallet::Table, Wallet::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs both the date-range and the type listing.
        manager
            .create_index(
                Index::create()
                    .name("idx-wallet_item-wallet_id-date")
                    .table(WalletItem::Table)
                    .col(WalletItem::WalletId)
                    .col(WalletItem::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WalletItem::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallet::Table).to_owned())
            .await?;
        Ok(())
    }
}
