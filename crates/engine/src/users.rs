//! User records.
//!
//! Users are created externally (seed tooling); the engine only reads them
//! and moves their balance on subscribe/cancel. Balance must stay ≥ 0 after
//! any successful operation.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{Money, notify::Channel};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub balance: Money,
    pub preferences: Vec<Channel>,
}

impl User {
    /// Whether the user opted into the given notification channel.
    pub fn wants(&self, channel: Channel) -> bool {
        self.preferences.contains(&channel)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub balance_minor: i64,
    /// Comma-joined canonical channel names ("email,sms").
    pub preferences: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        let preferences = user
            .preferences
            .iter()
            .map(|channel| channel.as_str())
            .collect::<Vec<_>>()
            .join(",");
        Self {
            id: ActiveValue::Set(user.id.clone()),
            name: ActiveValue::Set(user.name.clone()),
            email: ActiveValue::Set(user.email.clone()),
            phone: ActiveValue::Set(user.phone.clone()),
            balance_minor: ActiveValue::Set(user.balance.minor()),
            preferences: ActiveValue::Set(preferences),
        }
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        // Unknown channel tokens are skipped rather than failing the read.
        let preferences = model
            .preferences
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .filter_map(|token| Channel::try_from(token).ok())
            .collect();
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            balance: Money::new(model.balance_minor),
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(preferences: &str) -> Model {
        Model {
            id: "user_1".to_string(),
            name: "Emmanuel".to_string(),
            email: "someone@example.com".to_string(),
            phone: "+573000000000".to_string(),
            balance_minor: 50_000_000,
            preferences: preferences.to_string(),
        }
    }

    #[test]
    fn preferences_parse_from_comma_joined_string() {
        let user = User::from(model("email,sms"));
        assert!(user.wants(Channel::Email));
        assert!(user.wants(Channel::Sms));

        let user = User::from(model("sms"));
        assert!(!user.wants(Channel::Email));
        assert!(user.wants(Channel::Sms));
    }

    #[test]
    fn unknown_preference_tokens_are_skipped() {
        let user = User::from(model("email,carrier_pigeon"));
        assert_eq!(user.preferences, vec![Channel::Email]);
    }
}
