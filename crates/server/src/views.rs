//! Mapping from engine domain types to wire views.

use api_types::{
    fund::FundView,
    transaction::{TransactionKind as ApiKind, TransactionView},
    user::UserView,
};
use chrono_tz::Tz;

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Subscription => ApiKind::Subscription,
        engine::TransactionKind::Cancellation => ApiKind::Cancellation,
    }
}

pub(crate) fn fund_view(fund: engine::Fund) -> FundView {
    FundView {
        id: fund.id,
        name: fund.name,
        minimum_subscription: fund.minimum_subscription.to_string(),
        category: fund.category,
    }
}

pub(crate) fn transaction_view(tx: engine::Transaction, timezone: Tz) -> TransactionView {
    TransactionView {
        id: tx.id,
        user_id: tx.user_id,
        fund_id: tx.fund_id,
        amount: tx.amount.to_string(),
        kind: map_kind(tx.kind),
        subscription_id: tx.subscription_id,
        occurred_at: tx.occurred_at.with_timezone(&timezone).fixed_offset(),
    }
}

pub(crate) fn user_view(overview: engine::UserOverview, timezone: Tz) -> UserView {
    let user = overview.user;
    UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        phone: user.phone,
        balance: user.balance.to_string(),
        notification_preferences: user
            .preferences
            .iter()
            .map(|channel| channel.as_str().to_string())
            .collect(),
        transactions: overview
            .transactions
            .into_iter()
            .map(|tx| transaction_view(tx, timezone))
            .collect(),
    }
}
