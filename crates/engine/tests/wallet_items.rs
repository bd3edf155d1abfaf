use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, EngineError, ItemType, NewWalletItem, UpdateWalletItemCmd};
use migration::MigratorTrait;

async fn engine_with_db(items_per_page: u64) -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .items_per_page(items_per_page)
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn dec(units: i64, scale: u32) -> Decimal {
    Decimal::new(units, scale)
}

fn new_item(wallet_id: i64, day: u32, item_type: ItemType, value: Decimal) -> NewWalletItem {
    NewWalletItem {
        wallet_id,
        date: date(day),
        item_type,
        description: "Conta de luz".to_string(),
        value,
    }
}

#[tokio::test]
async fn save_and_read_back_round_trips_fields() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira 1", dec(500, 0)).await.unwrap();

    let saved = engine
        .save_wallet_item(new_item(wallet.id, 5, ItemType::Income, dec(50, 0)))
        .await
        .unwrap();

    let found = engine.wallet_item(saved.id).await.unwrap().unwrap();
    assert_eq!(found, saved);
    assert_eq!(found.wallet_id, wallet.id);
    assert_eq!(found.date, date(5));
    assert_eq!(found.item_type, ItemType::Income);
    assert_eq!(found.description, "Conta de luz");
    assert_eq!(found.value, dec(50, 0));
}

#[tokio::test]
async fn save_rejects_negative_value() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();

    let err = engine
        .save_wallet_item(new_item(wallet.id, 1, ItemType::Expense, dec(-1, 0)))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("value must be >= 0".to_string())
    );
}

#[tokio::test]
async fn save_rejects_unknown_wallet() {
    let (engine, _db) = engine_with_db(10).await;

    let err = engine
        .save_wallet_item(new_item(42, 1, ItemType::Income, dec(1, 0)))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("Wallet with id 42 not found".to_string())
    );
}

#[tokio::test]
async fn update_changes_description() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(250, 0)).await.unwrap();
    let saved = engine
        .save_wallet_item(new_item(wallet.id, 3, ItemType::Income, dec(50, 0)))
        .await
        .unwrap();

    let updated = engine
        .update_wallet_item(UpdateWalletItemCmd {
            id: saved.id,
            wallet_id: wallet.id,
            date: saved.date,
            item_type: saved.item_type,
            description: "Descrição alterada".to_string(),
            value: saved.value,
        })
        .await
        .unwrap();

    assert_eq!(updated.description, "Descrição alterada");
    let found = engine.wallet_item(saved.id).await.unwrap().unwrap();
    assert_eq!(found.description, "Descrição alterada");
}

#[tokio::test]
async fn update_rejects_wallet_change_without_writing() {
    let (engine, _db) = engine_with_db(10).await;
    let first = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();
    let second = engine.new_wallet("Outra", dec(0, 0)).await.unwrap();
    let saved = engine
        .save_wallet_item(new_item(first.id, 3, ItemType::Income, dec(50, 0)))
        .await
        .unwrap();

    let err = engine
        .update_wallet_item(UpdateWalletItemCmd {
            id: saved.id,
            wallet_id: second.id,
            date: date(4),
            item_type: ItemType::Expense,
            description: "Nova descrição".to_string(),
            value: dec(10, 0),
        })
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::WalletChange);
    assert_eq!(err.to_string(), "You cannot change the wallet");
    assert_eq!(engine.wallet_item(saved.id).await.unwrap().unwrap(), saved);
    assert_eq!(engine.wallet(first.id).await.unwrap().value, dec(50, 0));
    assert_eq!(engine.wallet(second.id).await.unwrap().value, dec(0, 0));
}

#[tokio::test]
async fn update_missing_item_is_invalid() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();

    let err = engine
        .update_wallet_item(UpdateWalletItemCmd {
            id: 99,
            wallet_id: wallet.id,
            date: date(1),
            item_type: ItemType::Income,
            description: "Nada".to_string(),
            value: dec(1, 0),
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidItem("WalletItem not found".to_string())
    );
}

#[tokio::test]
async fn delete_removes_item() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();
    let saved = engine
        .save_wallet_item(new_item(wallet.id, 3, ItemType::Income, dec(50, 0)))
        .await
        .unwrap();

    engine.delete_wallet_item(saved.id).await.unwrap();

    assert!(engine.wallet_item(saved.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_missing_item_is_not_found() {
    let (engine, _db) = engine_with_db(10).await;

    let err = engine.delete_wallet_item(99).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::KeyNotFound("WalletItem with id 99 not found".to_string())
    );
}

#[tokio::test]
async fn sum_adds_every_item_value() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();
    let other = engine.new_wallet("Outra", dec(0, 0)).await.unwrap();

    engine
        .save_wallet_item(new_item(wallet.id, 1, ItemType::Income, dec(10080, 2)))
        .await
        .unwrap();
    engine
        .save_wallet_item(new_item(wallet.id, 2, ItemType::Income, dec(115, 0)))
        .await
        .unwrap();
    engine
        .save_wallet_item(new_item(other.id, 2, ItemType::Income, dec(7, 0)))
        .await
        .unwrap();

    let total = engine.sum_wallet_items(wallet.id).await.unwrap();
    assert_eq!(total, dec(21580, 2));
    assert_eq!(total.to_string(), "215.8");
}

#[tokio::test]
async fn sum_of_empty_wallet_is_zero() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(10, 0)).await.unwrap();

    assert_eq!(engine.sum_wallet_items(wallet.id).await.unwrap(), Decimal::ZERO);
}

#[tokio::test]
async fn between_dates_is_inclusive_and_scoped_to_wallet() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();
    let other = engine.new_wallet("Outra", dec(0, 0)).await.unwrap();

    for day in [1, 5, 10, 15, 20] {
        engine
            .save_wallet_item(new_item(wallet.id, day, ItemType::Income, dec(1, 0)))
            .await
            .unwrap();
    }
    engine
        .save_wallet_item(new_item(other.id, 10, ItemType::Income, dec(1, 0)))
        .await
        .unwrap();

    let page = engine
        .wallet_items_between(wallet.id, date(5), date(15), 0)
        .await
        .unwrap();

    let dates: Vec<NaiveDate> = page.items.iter().map(|item| item.date).collect();
    assert_eq!(dates, vec![date(5), date(10), date(15)]);
    assert!(page.items.iter().all(|item| item.wallet_id == wallet.id));
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn between_dates_paginates_in_id_order() {
    let (engine, _db) = engine_with_db(2).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();

    let mut ids = Vec::new();
    for day in [9, 3, 7, 1, 5] {
        let item = engine
            .save_wallet_item(new_item(wallet.id, day, ItemType::Expense, dec(1, 0)))
            .await
            .unwrap();
        ids.push(item.id);
    }

    let first = engine
        .wallet_items_between(wallet.id, date(1), date(31), 0)
        .await
        .unwrap();
    let last = engine
        .wallet_items_between(wallet.id, date(1), date(31), 2)
        .await
        .unwrap();
    let past_end = engine
        .wallet_items_between(wallet.id, date(1), date(31), 3)
        .await
        .unwrap();

    assert_eq!(
        first.items.iter().map(|i| i.id).collect::<Vec<_>>(),
        ids[..2].to_vec()
    );
    assert_eq!(first.total_items, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.size, 2);
    assert_eq!(last.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![ids[4]]);
    assert!(past_end.items.is_empty());
}

#[tokio::test]
async fn between_dates_rejects_reversed_range() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();

    let err = engine
        .wallet_items_between(wallet.id, date(10), date(9), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidRange(_)));
}

#[tokio::test]
async fn between_dates_rejects_unreachable_page() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();
    engine
        .save_wallet_item(new_item(wallet.id, 1, ItemType::Income, dec(1, 0)))
        .await
        .unwrap();

    let err = engine
        .wallet_items_between(wallet.id, date(1), date(31), u64::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidRange(_)));

    let err = engine
        .wallet_items_between(wallet.id, date(1), date(31), u64::MAX / 10)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidRange(_)));

    let page = engine
        .wallet_items_between(wallet.id, date(1), date(31), 1000)
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 1);
}

#[tokio::test]
async fn by_type_is_scoped_to_wallet() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();
    let other = engine.new_wallet("Outra", dec(0, 0)).await.unwrap();

    let income = engine
        .save_wallet_item(new_item(wallet.id, 1, ItemType::Income, dec(20, 0)))
        .await
        .unwrap();
    engine
        .save_wallet_item(new_item(wallet.id, 2, ItemType::Expense, dec(5, 0)))
        .await
        .unwrap();
    engine
        .save_wallet_item(new_item(other.id, 2, ItemType::Income, dec(3, 0)))
        .await
        .unwrap();

    let items = engine
        .wallet_items_by_type(wallet.id, ItemType::Income)
        .await
        .unwrap();
    assert_eq!(items, vec![income]);
}

#[tokio::test]
async fn queries_on_unknown_wallet_are_not_found() {
    let (engine, _db) = engine_with_db(10).await;

    assert!(matches!(
        engine.sum_wallet_items(7).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.wallet_items_by_type(7, ItemType::Income).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn wallet_value_tracks_income_minus_expense() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(250, 0)).await.unwrap();

    let salary = engine
        .save_wallet_item(new_item(wallet.id, 1, ItemType::Income, dec(100050, 2)))
        .await
        .unwrap();
    let rent = engine
        .save_wallet_item(new_item(wallet.id, 2, ItemType::Expense, dec(600, 0)))
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet.id).await.unwrap().value, dec(65050, 2));

    // Turning the expense into an income moves the balance twice its value.
    engine
        .update_wallet_item(UpdateWalletItemCmd {
            id: rent.id,
            wallet_id: wallet.id,
            date: rent.date,
            item_type: ItemType::Income,
            description: rent.description.clone(),
            value: rent.value,
        })
        .await
        .unwrap();
    assert_eq!(engine.wallet(wallet.id).await.unwrap().value, dec(185050, 2));

    engine.delete_wallet_item(salary.id).await.unwrap();
    assert_eq!(engine.wallet(wallet.id).await.unwrap().value, dec(850, 0));

    let totals = engine.wallet_item_totals(wallet.id).await.unwrap();
    assert_eq!(totals.total_income, dec(600, 0));
    assert_eq!(totals.total_expense, Decimal::ZERO);
    assert_eq!(totals.net, dec(600, 0));
}

#[tokio::test]
async fn wallet_value_overflow_is_rejected_without_writing() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine
        .new_wallet("Carteira", dec(i64::MAX, 2))
        .await
        .unwrap();

    let err = engine
        .save_wallet_item(new_item(wallet.id, 1, ItemType::Income, dec(1, 0)))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidAmount("wallet value too large".to_string())
    );

    assert_eq!(engine.wallet(wallet.id).await.unwrap().value, dec(i64::MAX, 2));
    assert!(
        engine
            .wallet_items_by_type(wallet.id, ItemType::Income)
            .await
            .unwrap()
            .is_empty()
    );

    // Expenses still move the balance down from the maximum.
    engine
        .save_wallet_item(new_item(wallet.id, 2, ItemType::Expense, dec(1, 2)))
        .await
        .unwrap();
    assert_eq!(
        engine.wallet(wallet.id).await.unwrap().value,
        dec(i64::MAX - 1, 2)
    );
}

#[tokio::test]
async fn totals_split_income_and_expense() {
    let (engine, _db) = engine_with_db(10).await;
    let wallet = engine.new_wallet("Carteira", dec(0, 0)).await.unwrap();

    engine
        .save_wallet_item(new_item(wallet.id, 1, ItemType::Income, dec(10080, 2)))
        .await
        .unwrap();
    engine
        .save_wallet_item(new_item(wallet.id, 2, ItemType::Expense, dec(3025, 2)))
        .await
        .unwrap();
    engine
        .save_wallet_item(new_item(wallet.id, 3, ItemType::Expense, dec(5, 1)))
        .await
        .unwrap();

    let totals = engine.wallet_item_totals(wallet.id).await.unwrap();
    assert_eq!(totals.total_income, dec(10080, 2));
    assert_eq!(totals.total_expense, dec(3075, 2));
    assert_eq!(totals.net, dec(7005, 2));
}
