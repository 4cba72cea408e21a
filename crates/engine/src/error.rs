//! The module contains the errors the engine can throw.
//!
//! Every predictable business-rule violation has its own variant carrying the
//! exact user-facing message; [`kind`] classifies each variant into the closed
//! failure set the presentation layer maps to HTTP status codes.
//!
//! [`kind`]: EngineError::kind

use sea_orm::DbErr;
use thiserror::Error;

use crate::Money;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("User not found")]
    UserNotFound,
    #[error("Fund {0} does not exist.")]
    FundNotFound(String),
    #[error(
        "You are already subscribed to fund {0}. You must cancel your subscription before subscribing again."
    )]
    AlreadySubscribed(String),
    #[error(
        "The amount you tried to subscribe ({amount}) is greater than your available balance ({balance}). The value of the fund {fund_name} is {minimum}, you must adjust the subscription to the amount of the fund."
    )]
    InsufficientBalance {
        amount: Money,
        balance: Money,
        fund_name: String,
        minimum: Money,
    },
    #[error("The minimum amount to subscribe to the fund {fund_name} is {minimum}.")]
    BelowMinimum { fund_name: String, minimum: Money },
    #[error("No active subscription found for fund {0}")]
    NoActiveSubscription(String),
    #[error("No funds available in the system.")]
    EmptyFundCatalog,
    #[error("No transactions found for this user.")]
    NoTransactions,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

/// Failure classification exposed to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Parameters,
    Resource,
    Conflict,
    System,
}

impl FailureKind {
    /// Canonical label used in the wire failure envelope.
    pub fn label(self) -> &'static str {
        match self {
            Self::Parameters => "ParametersError",
            Self::Resource => "ResourceError",
            Self::Conflict => "ConflictError",
            Self::System => "SystemError",
        }
    }

    /// HTTP status code associated with the classification.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Parameters => 400,
            Self::Resource => 404,
            Self::Conflict => 409,
            Self::System => 500,
        }
    }
}

impl EngineError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UserNotFound | Self::FundNotFound(_) | Self::NoTransactions => {
                FailureKind::Resource
            }
            Self::AlreadySubscribed(_) => FailureKind::Conflict,
            Self::InsufficientBalance { .. }
            | Self::BelowMinimum { .. }
            | Self::NoActiveSubscription(_)
            | Self::InvalidAmount(_) => FailureKind::Parameters,
            Self::EmptyFundCatalog | Self::CorruptRecord(_) | Self::Database(_) => {
                FailureKind::System
            }
        }
    }

    /// Message used in the wire failure envelope.
    ///
    /// Internal faults are prefixed with the fault kind; business-rule
    /// violations pass through verbatim.
    pub fn failure_message(&self) -> String {
        match self {
            Self::Database(err) => format!("DbErr: {err}"),
            other => other.to_string(),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::FundNotFound(a), Self::FundNotFound(b)) => a == b,
            (Self::AlreadySubscribed(a), Self::AlreadySubscribed(b)) => a == b,
            (
                Self::InsufficientBalance {
                    amount: a_amount,
                    balance: a_balance,
                    fund_name: a_fund,
                    minimum: a_min,
                },
                Self::InsufficientBalance {
                    amount: b_amount,
                    balance: b_balance,
                    fund_name: b_fund,
                    minimum: b_min,
                },
            ) => {
                a_amount == b_amount && a_balance == b_balance && a_fund == b_fund && a_min == b_min
            }
            (
                Self::BelowMinimum {
                    fund_name: a_fund,
                    minimum: a_min,
                },
                Self::BelowMinimum {
                    fund_name: b_fund,
                    minimum: b_min,
                },
            ) => a_fund == b_fund && a_min == b_min,
            (Self::NoActiveSubscription(a), Self::NoActiveSubscription(b)) => a == b,
            (Self::EmptyFundCatalog, Self::EmptyFundCatalog) => true,
            (Self::NoTransactions, Self::NoTransactions) => true,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::CorruptRecord(a), Self::CorruptRecord(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_violations_classify_as_parameters() {
        let err = EngineError::BelowMinimum {
            fund_name: "DEUDAPRIVADA".to_string(),
            minimum: Money::new(5_000_000),
        };
        assert_eq!(err.kind(), FailureKind::Parameters);
        assert_eq!(err.kind().status_code(), 400);
    }

    #[test]
    fn missing_entities_classify_as_resource() {
        assert_eq!(EngineError::UserNotFound.kind(), FailureKind::Resource);
        assert_eq!(
            EngineError::FundNotFound("fund_9".to_string()).kind().status_code(),
            404
        );
    }

    #[test]
    fn duplicate_subscription_classifies_as_conflict() {
        let err = EngineError::AlreadySubscribed("FDO-ACCIONES".to_string());
        assert_eq!(err.kind(), FailureKind::Conflict);
        assert_eq!(err.kind().label(), "ConflictError");
    }

    #[test]
    fn database_faults_are_system_with_prefixed_message() {
        let err = EngineError::Database(DbErr::Custom("connection reset".to_string()));
        assert_eq!(err.kind(), FailureKind::System);
        assert!(err.failure_message().starts_with("DbErr: "));
    }

    #[test]
    fn below_minimum_names_the_minimum_to_two_decimals() {
        let err = EngineError::BelowMinimum {
            fund_name: "FPV_BTG_PACTUAL_RECAUDADORA".to_string(),
            minimum: Money::new(7_500_000),
        };
        assert_eq!(
            err.to_string(),
            "The minimum amount to subscribe to the fund FPV_BTG_PACTUAL_RECAUDADORA is 75000.00."
        );
    }
}
