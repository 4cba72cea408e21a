//! Subscribe/cancel endpoints

use api_types::response::Success;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Money;

use crate::{ServerError, server::ServerState};

pub async fn subscribe(
    State(state): State<ServerState>,
    Path((user_id, fund_id, amount)): Path<(String, String, String)>,
) -> Result<(StatusCode, Json<Success<String>>), ServerError> {
    let amount: Money = amount.parse().map_err(ServerError::Engine)?;
    let message = state.engine.subscribe(&user_id, &fund_id, amount).await?;

    Ok((StatusCode::CREATED, Json(Success::created(message))))
}

pub async fn cancel(
    State(state): State<ServerState>,
    Path((user_id, fund_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Success<String>>), ServerError> {
    let message = state.engine.cancel(&user_id, &fund_id).await?;

    Ok((StatusCode::CREATED, Json(Success::created(message))))
}
