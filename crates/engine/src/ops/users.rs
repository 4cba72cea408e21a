use serde::{Deserialize, Serialize};

use crate::{Engine, EngineError, ResultEngine, store, transactions::Transaction, users::User};

/// A user record with its full transaction history attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserOverview {
    pub user: User,
    pub transactions: Vec<Transaction>,
}

impl Engine {
    /// The sole user record with its transaction history.
    ///
    /// Single-tenant shortcut: the deployment holds exactly one user.
    /// TODO: take the authenticated caller's id once an identity layer exists.
    pub async fn user_overview(&self) -> ResultEngine<UserOverview> {
        let user = store::find_sole_user(&self.database)
            .await?
            .ok_or(EngineError::UserNotFound)?;
        let transactions = store::get_transactions(&self.database, &user.id).await?;
        Ok(UserOverview { user, transactions })
    }
}
