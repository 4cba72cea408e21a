use std::sync::Arc;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use chrono_tz::Tz;

use crate::{funds, history, subscriptions, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    /// Reference timezone used to render timestamps at the boundary.
    pub timezone: Tz,
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::permanent("/funds") }))
        .route("/funds", get(funds::list))
        .route("/user", get(user::overview))
        .route(
            "/subscribe/{user_id}/{fund_id}/{amount}",
            post(subscriptions::subscribe),
        )
        .route("/cancel/{user_id}/{fund_id}", post(subscriptions::cancel))
        .route("/history/{user_id}", get(history::list))
        .with_state(state)
}

pub async fn run(engine: Engine, timezone: Tz) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, timezone, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    timezone: Tz,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        timezone,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    timezone: Tz,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, timezone, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
