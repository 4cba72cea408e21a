//! Fund catalog entries.
//!
//! Read-only reference data from the engine's point of view.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::Money;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub id: String,
    pub name: String,
    pub minimum_subscription: Money,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "funds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub minimum_subscription_minor: i64,
    pub category: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Fund> for ActiveModel {
    fn from(fund: &Fund) -> Self {
        Self {
            id: ActiveValue::Set(fund.id.clone()),
            name: ActiveValue::Set(fund.name.clone()),
            minimum_subscription_minor: ActiveValue::Set(fund.minimum_subscription.minor()),
            category: ActiveValue::Set(fund.category.clone()),
        }
    }
}

impl From<Model> for Fund {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            minimum_subscription: Money::new(model.minimum_subscription_minor),
            category: model.category,
        }
    }
}
