use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod response {
    use super::*;

    /// Envelope for successful replies: classification, HTTP status, payload.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Success<T> {
        #[serde(rename = "type")]
        pub kind: String,
        pub status_code: u16,
        pub value: T,
    }

    impl<T> Success<T> {
        /// A plain fetch result (200).
        pub fn ok(value: T) -> Self {
            Self {
                kind: "Success".to_string(),
                status_code: 200,
                value,
            }
        }

        /// A result that created state (201).
        pub fn created(value: T) -> Self {
            Self {
                kind: "Created".to_string(),
                status_code: 201,
                value,
            }
        }
    }

    /// Envelope for failures: classification, HTTP status, human message.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Failure {
        #[serde(rename = "type")]
        pub kind: String,
        pub status_code: u16,
        pub message: String,
    }
}

pub mod fund {
    use super::*;

    /// A catalog entry. Amounts are decimal strings with two fraction digits.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct FundView {
        pub id: String,
        pub name: String,
        pub minimum_subscription: String,
        pub category: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Subscription,
        Cancellation,
    }

    /// An audit-log entry. `occurred_at` carries the reference-timezone
    /// offset the server is configured with.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub user_id: String,
        pub fund_id: String,
        pub amount: String,
        pub kind: TransactionKind,
        pub subscription_id: Option<Uuid>,
        pub occurred_at: DateTime<FixedOffset>,
    }
}

pub mod user {
    use super::*;
    use crate::transaction::TransactionView;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub name: String,
        pub email: String,
        pub phone: String,
        pub balance: String,
        pub notification_preferences: Vec<String>,
        pub transactions: Vec<TransactionView>,
    }
}

#[cfg(test)]
mod tests {
    use super::response::{Failure, Success};

    #[test]
    fn success_envelope_serializes_type_and_value() {
        let json = serde_json::to_value(Success::ok(vec!["a", "b"])).unwrap();
        assert_eq!(json["type"], "Success");
        assert_eq!(json["status_code"], 200);
        assert_eq!(json["value"][0], "a");
    }

    #[test]
    fn created_envelope_carries_201() {
        let json = serde_json::to_value(Success::created("done")).unwrap();
        assert_eq!(json["type"], "Created");
        assert_eq!(json["status_code"], 201);
    }

    #[test]
    fn failure_envelope_round_trips() {
        let failure = Failure {
            kind: "ConflictError".to_string(),
            status_code: 409,
            message: "already subscribed".to_string(),
        };
        let json = serde_json::to_string(&failure).unwrap();
        let back: Failure = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind, "ConflictError");
        assert_eq!(back.status_code, 409);
    }
}
