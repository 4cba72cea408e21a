use crate::{Engine, EngineError, ResultEngine, store, transactions::Transaction};

impl Engine {
    /// The transactions recorded for a user, in store order.
    ///
    /// A user with no transactions is reported as a missing resource, not an
    /// empty success.
    pub async fn transaction_history(&self, user_id: &str) -> ResultEngine<Vec<Transaction>> {
        if store::find_user(&self.database, user_id).await?.is_none() {
            return Err(EngineError::UserNotFound);
        }

        let transactions = store::get_transactions(&self.database, user_id).await?;
        if transactions.is_empty() {
            return Err(EngineError::NoTransactions);
        }
        Ok(transactions)
    }
}
