//! Account operation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why an amount was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountRejection {
    /// Not a finite number.
    #[error("Invalid amount. Please provide a valid number.")]
    NotANumber,

    /// Deposit of zero or less.
    #[error("Deposit amount should be greater than zero.")]
    NonPositiveDeposit,

    /// Withdrawal of zero or less.
    #[error("Withdrawal amount should be greater than zero.")]
    NonPositiveWithdrawal,

    /// Value does not fit the balance representation.
    #[error("Amount is outside the supported range.")]
    OutOfRange,
}

/// Errors reported by deposit and withdraw. The balance is untouched when
/// any of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Amount is non-numeric, non-finite, or not strictly positive.
    #[error("{0}")]
    InvalidAmount(AmountRejection),

    /// Withdrawal larger than the current balance.
    #[error("Insufficient funds. Requested {requested}, available {available}.")]
    InsufficientFunds {
        /// Amount asked for.
        requested: Decimal,
        /// Balance at the time of the request.
        available: Decimal,
    },
}

impl AccountError {
    /// Stable message key for catalog lookups and log events.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidAmount(AmountRejection::NotANumber) => "amount.not_a_number",
            Self::InvalidAmount(AmountRejection::NonPositiveDeposit) => "deposit.non_positive",
            Self::InvalidAmount(AmountRejection::NonPositiveWithdrawal) => {
                "withdraw.non_positive"
            }
            Self::InvalidAmount(AmountRejection::OutOfRange) => "amount.out_of_range",
            Self::InsufficientFunds { .. } => "withdraw.insufficient_funds",
        }
    }
}
