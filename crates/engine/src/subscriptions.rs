//! Active subscriptions.
//!
//! A row is the live link between a user and a fund. At most one row exists
//! per `(user_id, fund_id)` pair; the migration backs this with a unique
//! index so a racing duplicate insert fails in the store. Cancellation hard
//! deletes the row.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub user_id: String,
    pub fund_id: String,
    pub amount: Money,
    pub subscribed_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(
        user_id: &str,
        fund_id: &str,
        amount: Money,
        subscribed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            fund_id: fund_id.to_string(),
            amount,
            subscribed_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub fund_id: String,
    pub amount_minor: i64,
    pub subscribed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Subscription> for ActiveModel {
    fn from(subscription: &Subscription) -> Self {
        Self {
            id: ActiveValue::Set(subscription.id.to_string()),
            user_id: ActiveValue::Set(subscription.user_id.clone()),
            fund_id: ActiveValue::Set(subscription.fund_id.clone()),
            amount_minor: ActiveValue::Set(subscription.amount.minor()),
            subscribed_at: ActiveValue::Set(subscription.subscribed_at),
        }
    }
}

impl TryFrom<Model> for Subscription {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| {
                EngineError::CorruptRecord(format!("invalid subscription id: {}", model.id))
            })?,
            user_id: model.user_id,
            fund_id: model.fund_id,
            amount: Money::new(model.amount_minor),
            subscribed_at: model.subscribed_at,
        })
    }
}
