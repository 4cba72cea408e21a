//! User endpoint

use api_types::{response::Success, user::UserView};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState, views};

pub async fn overview(
    State(state): State<ServerState>,
) -> Result<Json<Success<UserView>>, ServerError> {
    let overview = state.engine.user_overview().await?;

    Ok(Json(Success::ok(views::user_view(overview, state.timezone))))
}
