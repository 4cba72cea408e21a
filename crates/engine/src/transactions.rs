//! Transaction primitives.
//!
//! A `Transaction` is an append-only audit record of a subscription or
//! cancellation event. Rows are never mutated or deleted.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Subscription,
    Cancellation,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subscription => "subscription",
            Self::Cancellation => "cancellation",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "subscription" => Ok(Self::Subscription),
            "cancellation" => Ok(Self::Cancellation),
            other => Err(EngineError::CorruptRecord(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub fund_id: String,
    pub amount: Money,
    pub kind: TransactionKind,
    /// For cancellations, the subscription being unwound.
    pub subscription_id: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    pub fn subscription(
        user_id: &str,
        fund_id: &str,
        amount: Money,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            fund_id: fund_id.to_string(),
            amount,
            kind: TransactionKind::Subscription,
            subscription_id: None,
            occurred_at,
        }
    }

    pub fn cancellation(
        user_id: &str,
        fund_id: &str,
        amount: Money,
        subscription_id: Uuid,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            fund_id: fund_id.to_string(),
            amount,
            kind: TransactionKind::Cancellation,
            subscription_id: Some(subscription_id),
            occurred_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub fund_id: String,
    pub amount_minor: i64,
    pub kind: String,
    pub subscription_id: Option<String>,
    pub occurred_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            fund_id: ActiveValue::Set(tx.fund_id.clone()),
            amount_minor: ActiveValue::Set(tx.amount.minor()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            subscription_id: ActiveValue::Set(tx.subscription_id.map(|id| id.to_string())),
            occurred_at: ActiveValue::Set(tx.occurred_at),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id).map_err(|_| {
                EngineError::CorruptRecord(format!("invalid transaction id: {}", model.id))
            })?,
            user_id: model.user_id,
            fund_id: model.fund_id,
            amount: Money::new(model.amount_minor),
            kind: TransactionKind::try_from(model.kind.as_str())?,
            subscription_id: model
                .subscription_id
                .and_then(|raw| Uuid::parse_str(&raw).ok()),
            occurred_at: model.occurred_at,
        })
    }
}
