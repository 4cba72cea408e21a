use crate::{Engine, EngineError, ResultEngine, funds::Fund, store};

impl Engine {
    /// All funds open for subscription.
    ///
    /// An empty catalog is a system integrity error, not a normal empty
    /// result: reference data is seeded before the service goes live.
    pub async fn list_funds(&self) -> ResultEngine<Vec<Fund>> {
        let funds = store::find_all_funds(&self.database).await?;
        if funds.is_empty() {
            return Err(EngineError::EmptyFundCatalog);
        }
        Ok(funds)
    }
}
