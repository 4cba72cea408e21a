//! Business-rule engine for fund subscriptions.
//!
//! The engine owns no durable state: every operation is a read-then-write
//! sequence against the database, with multi-step writes committed inside a
//! single database transaction. Notifications are handed to a bounded queue
//! and never fail the operation that produced them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use error::{EngineError, FailureKind};
pub use funds::Fund;
pub use money::Money;
pub use notify::{
    Channel, DEFAULT_QUEUE_DEPTH, LogNotifier, Notification, NotificationSender, Notifier,
    NotifyError,
};
pub use ops::UserOverview;
pub use subscriptions::Subscription;
pub use transactions::{Transaction, TransactionKind};
pub use users::User;

mod error;
mod funds;
mod money;
mod notify;
mod ops;
mod store;
mod subscriptions;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    notifications: NotificationSender,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    notifications: Option<NotificationSender>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Pass the notification queue handle. When omitted, `build` spawns a
    /// [`LogNotifier`] dispatcher with the default queue depth.
    pub fn notifications(mut self, sender: NotificationSender) -> EngineBuilder {
        self.notifications = Some(sender);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let notifications = match self.notifications {
            Some(sender) => sender,
            None => NotificationSender::spawn(Arc::new(LogNotifier), DEFAULT_QUEUE_DEPTH),
        };

        Ok(Engine {
            database: self.database,
            notifications,
        })
    }
}
