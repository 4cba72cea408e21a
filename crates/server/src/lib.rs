use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod funds;
mod history;
mod server;
mod subscriptions;
mod user;
mod views;

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn failure_for_engine_error(err: EngineError) -> api_types::response::Failure {
    if let EngineError::Database(db_err) = &err {
        tracing::error!("database error: {db_err}");
    }

    api_types::response::Failure {
        kind: err.kind().label().to_string(),
        status_code: err.kind().status_code(),
        message: err.failure_message(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let failure = match self {
            ServerError::Engine(err) => failure_for_engine_error(err),
            ServerError::Generic(message) => api_types::response::Failure {
                kind: "ParametersError".to_string(),
                status_code: 400,
                message,
            },
        };

        let status =
            StatusCode::from_u16(failure.status_code).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(failure)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
