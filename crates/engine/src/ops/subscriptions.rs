use chrono::Utc;
use sea_orm::TransactionTrait;

use crate::{
    Engine, EngineError, Money, ResultEngine,
    notify::{Channel, Notification},
    store,
    subscriptions::Subscription,
    transactions::Transaction,
    users::User,
};

impl Engine {
    /// Subscribes a user to a fund.
    ///
    /// Validation order: user, fund, duplicate subscription, balance, fund
    /// minimum. The subscription row, the audit transaction, and the balance
    /// debit are committed atomically; the confirmation notification is
    /// dispatched after commit and cannot fail the operation.
    pub async fn subscribe(
        &self,
        user_id: &str,
        fund_id: &str,
        amount: Money,
    ) -> ResultEngine<String> {
        let user = store::find_user(&self.database, user_id)
            .await?
            .ok_or(EngineError::UserNotFound)?;
        let fund = store::find_fund(&self.database, fund_id)
            .await?
            .ok_or_else(|| EngineError::FundNotFound(fund_id.to_string()))?;

        if store::has_active_subscription(&self.database, user_id, fund_id).await? {
            return Err(EngineError::AlreadySubscribed(fund.name));
        }
        if amount > user.balance {
            return Err(EngineError::InsufficientBalance {
                amount,
                balance: user.balance,
                fund_name: fund.name,
                minimum: fund.minimum_subscription,
            });
        }
        if amount < fund.minimum_subscription {
            return Err(EngineError::BelowMinimum {
                fund_name: fund.name,
                minimum: fund.minimum_subscription,
            });
        }

        let now = Utc::now();
        let subscription = Subscription::new(user_id, fund_id, amount, now);
        let entry = Transaction::subscription(user_id, fund_id, amount, now);

        let db_tx = self.database.begin().await?;
        match store::insert_subscription(&db_tx, &subscription).await {
            // A racing subscribe that slipped past the check above loses to
            // the unique (user_id, fund_id) index.
            Err(EngineError::Database(err)) if store::is_unique_violation(&err) => {
                return Err(EngineError::AlreadySubscribed(fund.name));
            }
            other => other?,
        }
        store::insert_transaction(&db_tx, &entry).await?;
        store::update_user_balance(&db_tx, user_id, -amount).await?;
        db_tx.commit().await?;

        self.send_notifications(
            &user,
            &format!("You have subscribed to fund {} for {}.", fund.name, amount),
        );

        Ok(format!("Successful subscription to fund {}", fund.name))
    }

    /// Cancels the user's active subscription to a fund and refunds the
    /// subscribed amount.
    pub async fn cancel(&self, user_id: &str, fund_id: &str) -> ResultEngine<String> {
        let user = store::find_user(&self.database, user_id)
            .await?
            .ok_or(EngineError::UserNotFound)?;
        let fund = store::find_fund(&self.database, fund_id)
            .await?
            .ok_or_else(|| EngineError::FundNotFound(fund_id.to_string()))?;

        let subscription = store::find_active_subscription(&self.database, user_id, fund_id)
            .await?
            .ok_or_else(|| EngineError::NoActiveSubscription(fund.name.clone()))?;

        let entry = Transaction::cancellation(
            user_id,
            fund_id,
            subscription.amount,
            subscription.id,
            Utc::now(),
        );

        let db_tx = self.database.begin().await?;
        store::insert_transaction(&db_tx, &entry).await?;
        store::remove_subscription(&db_tx, subscription.id).await?;
        store::update_user_balance(&db_tx, user_id, subscription.amount).await?;
        db_tx.commit().await?;

        self.send_notifications(
            &user,
            &format!(
                "You have cancelled your subscription to fund {} and have been refunded {}.",
                fund.name, subscription.amount
            ),
        );

        Ok(format!(
            "Successful cancellation of subscription to fund {}",
            fund.name
        ))
    }

    /// Fans the message out to every channel the user opted into.
    fn send_notifications(&self, user: &User, message: &str) {
        if user.wants(Channel::Email) {
            self.notifications.push(Notification {
                channel: Channel::Email,
                address: user.email.clone(),
                message: message.to_string(),
            });
        }
        if user.wants(Channel::Sms) {
            self.notifications.push(Notification {
                channel: Channel::Sms,
                address: user.phone.clone(),
                message: message.to_string(),
            });
        }
    }
}
