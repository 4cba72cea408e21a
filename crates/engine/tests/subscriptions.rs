use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, FailureKind, Money, TransactionKind};
use migration::MigratorTrait;

const USER_ID: &str = "3f6c2b1a-usr";

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn seed_user(db: &DatabaseConnection, balance_minor: i64, preferences: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (id, name, email, phone, balance_minor, preferences) \
         VALUES (?, ?, ?, ?, ?, ?)",
        vec![
            USER_ID.into(),
            "Emmanuel".into(),
            "emmanuel@example.com".into(),
            "+573043543065".into(),
            balance_minor.into(),
            preferences.into(),
        ],
    ))
    .await
    .unwrap();
}

async fn seed_fund(db: &DatabaseConnection, id: &str, name: &str, minimum_minor: i64) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO funds (id, name, minimum_subscription_minor, category) \
         VALUES (?, ?, ?, ?)",
        vec![id.into(), name.into(), minimum_minor.into(), "FPV".into()],
    ))
    .await
    .unwrap();
}

async fn balance(engine: &Engine) -> Money {
    engine.user_overview().await.unwrap().user.balance
}

#[tokio::test]
async fn empty_catalog_is_a_system_error() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.list_funds().await.unwrap_err();
    assert_eq!(err, EngineError::EmptyFundCatalog);
    assert_eq!(err.kind(), FailureKind::System);
}

#[tokio::test]
async fn list_funds_returns_the_catalog() {
    let (engine, db) = engine_with_db().await;
    seed_fund(&db, "fund_1", "FPV_BTG_PACTUAL_RECAUDADORA", 7_500_000).await;
    seed_fund(&db, "fund_3", "DEUDAPRIVADA", 5_000_000).await;

    let funds = engine.list_funds().await.unwrap();
    assert_eq!(funds.len(), 2);
    assert!(funds.iter().any(|f| f.name == "DEUDAPRIVADA"));
}

#[tokio::test]
async fn subscribe_below_minimum_is_rejected_regardless_of_balance() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email").await;
    seed_fund(&db, "fund_1", "FPV_BTG_PACTUAL_RECAUDADORA", 7_500_000).await;

    let err = engine
        .subscribe(USER_ID, "fund_1", Money::new(5_000_000))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parameters);
    assert!(err.to_string().contains("75000.00"));
    assert_eq!(balance(&engine).await, Money::new(50_000_000));
}

#[tokio::test]
async fn subscribe_over_balance_is_rejected() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 5_000_000, "email").await;
    seed_fund(&db, "fund_2", "FPV_BTG_PACTUAL_ECOPETROL", 1_000_000).await;

    let err = engine
        .subscribe(USER_ID, "fund_2", Money::new(6_000_000))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Parameters);
    assert!(err.to_string().contains("60000.00"));
    assert!(err.to_string().contains("50000.00"));
}

#[tokio::test]
async fn subscribe_to_unknown_fund_is_a_resource_error() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email").await;

    let err = engine
        .subscribe(USER_ID, "fund_9", Money::new(7_500_000))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::FundNotFound("fund_9".to_string()));
    assert_eq!(err.kind(), FailureKind::Resource);
}

#[tokio::test]
async fn subscribe_as_unknown_user_is_a_resource_error() {
    let (engine, db) = engine_with_db().await;
    seed_fund(&db, "fund_1", "FPV_BTG_PACTUAL_RECAUDADORA", 7_500_000).await;

    let err = engine
        .subscribe("nobody", "fund_1", Money::new(7_500_000))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::UserNotFound);
}

#[tokio::test]
async fn subscribe_debits_balance_and_records_the_transaction() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email,sms").await;
    seed_fund(&db, "fund_1", "FPV_BTG_PACTUAL_RECAUDADORA", 7_500_000).await;

    let message = engine
        .subscribe(USER_ID, "fund_1", Money::new(7_500_000))
        .await
        .unwrap();
    assert_eq!(
        message,
        "Successful subscription to fund FPV_BTG_PACTUAL_RECAUDADORA"
    );
    assert_eq!(balance(&engine).await, Money::new(42_500_000));

    let history = engine.transaction_history(USER_ID).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].kind, TransactionKind::Subscription);
    assert_eq!(history[0].amount, Money::new(7_500_000));
    assert_eq!(history[0].fund_id, "fund_1");
}

#[tokio::test]
async fn duplicate_subscription_is_a_conflict() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email").await;
    seed_fund(&db, "fund_1", "FPV_BTG_PACTUAL_RECAUDADORA", 7_500_000).await;

    engine
        .subscribe(USER_ID, "fund_1", Money::new(7_500_000))
        .await
        .unwrap();
    let err = engine
        .subscribe(USER_ID, "fund_1", Money::new(7_500_000))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Conflict);
    assert!(err.to_string().contains("FPV_BTG_PACTUAL_RECAUDADORA"));
}

#[tokio::test]
async fn cancel_without_subscription_is_rejected() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email").await;
    seed_fund(&db, "fund_4", "FDO-ACCIONES", 25_000_000).await;

    let err = engine.cancel(USER_ID, "fund_4").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NoActiveSubscription("FDO-ACCIONES".to_string())
    );
    assert_eq!(err.kind(), FailureKind::Parameters);
}

#[tokio::test]
async fn subscribe_then_cancel_restores_the_balance_exactly() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email,sms").await;
    seed_fund(&db, "fund_1", "FPV_BTG_PACTUAL_RECAUDADORA", 7_500_000).await;

    engine
        .subscribe(USER_ID, "fund_1", Money::new(7_500_000))
        .await
        .unwrap();
    assert_eq!(balance(&engine).await, Money::new(42_500_000));

    let message = engine.cancel(USER_ID, "fund_1").await.unwrap();
    assert_eq!(
        message,
        "Successful cancellation of subscription to fund FPV_BTG_PACTUAL_RECAUDADORA"
    );
    assert_eq!(balance(&engine).await, Money::new(50_000_000));

    let history = engine.transaction_history(USER_ID).await.unwrap();
    assert_eq!(history.len(), 2);

    let subscription_entry = history
        .iter()
        .find(|tx| tx.kind == TransactionKind::Subscription)
        .unwrap();
    let cancellation_entry = history
        .iter()
        .find(|tx| tx.kind == TransactionKind::Cancellation)
        .unwrap();
    assert_eq!(cancellation_entry.amount, subscription_entry.amount);
    assert_eq!(cancellation_entry.fund_id, subscription_entry.fund_id);
    assert!(cancellation_entry.subscription_id.is_some());
}

#[tokio::test]
async fn resubscribing_after_cancel_is_permitted() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email").await;
    seed_fund(&db, "fund_3", "DEUDAPRIVADA", 5_000_000).await;

    engine
        .subscribe(USER_ID, "fund_3", Money::new(5_000_000))
        .await
        .unwrap();
    engine.cancel(USER_ID, "fund_3").await.unwrap();
    engine
        .subscribe(USER_ID, "fund_3", Money::new(6_000_000))
        .await
        .unwrap();

    assert_eq!(balance(&engine).await, Money::new(44_000_000));
    let history = engine.transaction_history(USER_ID).await.unwrap();
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn history_without_transactions_is_a_resource_error() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email").await;

    let err = engine.transaction_history(USER_ID).await.unwrap_err();
    assert_eq!(err, EngineError::NoTransactions);
    assert_eq!(err.kind(), FailureKind::Resource);
}

#[tokio::test]
async fn history_for_unknown_user_is_a_resource_error() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.transaction_history("nobody").await.unwrap_err();
    assert_eq!(err, EngineError::UserNotFound);
}

#[tokio::test]
async fn user_overview_attaches_the_transaction_history() {
    let (engine, db) = engine_with_db().await;
    seed_user(&db, 50_000_000, "email").await;
    seed_fund(&db, "fund_5", "FPV_BTG_PACTUAL_DINAMICA", 10_000_000).await;

    engine
        .subscribe(USER_ID, "fund_5", Money::new(10_000_000))
        .await
        .unwrap();

    let overview = engine.user_overview().await.unwrap();
    assert_eq!(overview.user.id, USER_ID);
    assert_eq!(overview.user.balance, Money::new(40_000_000));
    assert_eq!(overview.transactions.len(), 1);
}

#[tokio::test]
async fn user_overview_without_a_user_is_a_resource_error() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.user_overview().await.unwrap_err();
    assert_eq!(err, EngineError::UserNotFound);
}
