use std::sync::Arc;

use chrono_tz::Tz;
use engine::{DEFAULT_QUEUE_DEPTH, LogNotifier, NotificationSender};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "fondo={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    tracing::info!("database connected, migrations applied");

    let timezone: Tz = settings
        .server
        .timezone
        .as_deref()
        .unwrap_or("America/Bogota")
        .parse()
        .map_err(|err| format!("invalid reference timezone: {err}"))?;

    let notifications = NotificationSender::spawn(
        Arc::new(LogNotifier),
        settings.server.notification_queue.unwrap_or(DEFAULT_QUEUE_DEPTH),
    );

    let engine = engine::Engine::builder()
        .database(db)
        .notifications(notifications)
        .build()
        .await?;

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, timezone, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
