//! Narrow gateway over the persistent collections.
//!
//! Every helper is generic over [`ConnectionTrait`] so the same call works on
//! the live connection and inside a database transaction. Faults surface as
//! [`EngineError::Database`]; the ops layer decides what survives a failed
//! write sequence.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    SqlErr,
};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine, funds, funds::Fund, subscriptions,
    subscriptions::Subscription, transactions, transactions::Transaction, users, users::User,
};

/// True when the fault is the store rejecting a duplicate key.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// The sole user record (single-tenant deployment).
pub(crate) async fn find_sole_user<C: ConnectionTrait>(db: &C) -> ResultEngine<Option<User>> {
    Ok(users::Entity::find().one(db).await?.map(User::from))
}

pub(crate) async fn find_user<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> ResultEngine<Option<User>> {
    Ok(users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .map(User::from))
}

pub(crate) async fn find_all_funds<C: ConnectionTrait>(db: &C) -> ResultEngine<Vec<Fund>> {
    Ok(funds::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(Fund::from)
        .collect())
}

pub(crate) async fn find_fund<C: ConnectionTrait>(
    db: &C,
    fund_id: &str,
) -> ResultEngine<Option<Fund>> {
    Ok(funds::Entity::find_by_id(fund_id)
        .one(db)
        .await?
        .map(Fund::from))
}

pub(crate) async fn has_active_subscription<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    fund_id: &str,
) -> ResultEngine<bool> {
    Ok(find_active_subscription(db, user_id, fund_id)
        .await?
        .is_some())
}

/// The active subscription for a `(user, fund)` pair, if any. The unique
/// index guarantees at most one row.
pub(crate) async fn find_active_subscription<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    fund_id: &str,
) -> ResultEngine<Option<Subscription>> {
    let model = subscriptions::Entity::find()
        .filter(subscriptions::Column::UserId.eq(user_id))
        .filter(subscriptions::Column::FundId.eq(fund_id))
        .one(db)
        .await?;
    model.map(Subscription::try_from).transpose()
}

pub(crate) async fn insert_subscription<C: ConnectionTrait>(
    db: &C,
    subscription: &Subscription,
) -> ResultEngine<()> {
    subscriptions::ActiveModel::from(subscription).insert(db).await?;
    Ok(())
}

pub(crate) async fn remove_subscription<C: ConnectionTrait>(
    db: &C,
    subscription_id: Uuid,
) -> ResultEngine<()> {
    subscriptions::Entity::delete_by_id(subscription_id.to_string())
        .exec(db)
        .await?;
    Ok(())
}

pub(crate) async fn insert_transaction<C: ConnectionTrait>(
    db: &C,
    transaction: &Transaction,
) -> ResultEngine<()> {
    transactions::ActiveModel::from(transaction).insert(db).await?;
    Ok(())
}

/// Applies a signed delta to the user's balance.
pub(crate) async fn update_user_balance<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
    delta: Money,
) -> ResultEngine<()> {
    let model = users::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(EngineError::UserNotFound)?;
    let balance = Money::new(model.balance_minor)
        .checked_add(delta)
        .ok_or_else(|| EngineError::InvalidAmount("balance overflow".to_string()))?;

    let active = users::ActiveModel {
        id: ActiveValue::Set(user_id.to_string()),
        balance_minor: ActiveValue::Set(balance.minor()),
        ..Default::default()
    };
    active.update(db).await?;
    Ok(())
}

/// All transactions recorded for a user, in store order.
pub(crate) async fn get_transactions<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> ResultEngine<Vec<Transaction>> {
    let models = transactions::Entity::find()
        .filter(transactions::Column::UserId.eq(user_id))
        .all(db)
        .await?;
    models.into_iter().map(Transaction::try_from).collect()
}
