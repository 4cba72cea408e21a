//! Fund catalog endpoint

use api_types::{fund::FundView, response::Success};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState, views};

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Success<Vec<FundView>>>, ServerError> {
    let funds = state.engine.list_funds().await?;
    let views = funds.into_iter().map(views::fund_view).collect();

    Ok(Json(Success::ok(views)))
}
