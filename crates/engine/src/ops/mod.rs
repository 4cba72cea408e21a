//! Engine operations, one module per use case.

mod funds;
mod history;
mod subscriptions;
mod users;

pub use users::UserOverview;
