//! Transaction history endpoint

use api_types::{response::Success, transaction::TransactionView};
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Success<Vec<TransactionView>>>, ServerError> {
    let transactions = state.engine.transaction_history(&user_id).await?;
    let views = transactions
        .into_iter()
        .map(|tx| views::transaction_view(tx, state.timezone))
        .collect();

    Ok(Json(Success::ok(views)))
}
