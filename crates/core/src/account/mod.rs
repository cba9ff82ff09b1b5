//! Balance-bearing accounts.
//!
//! An account refers to exactly one identity and never owns it. All
//! validation happens before the balance is touched, so a rejected deposit or
//! withdrawal leaves the account exactly as it was.

pub mod amount;
pub mod book;
pub mod error;

#[cfg(test)]
mod props;

pub use amount::parse_amount;
pub use book::AccountBook;
pub use error::{AccountError, AmountRejection};

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::identity::{Identity, IdentityDetail};

/// Owner details plus the current balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceView {
    /// Owner projection.
    #[serde(rename = "user_details")]
    pub owner: IdentityDetail,
    /// Current balance.
    #[serde(rename = "account_balance")]
    pub balance: Decimal,
}

/// A non-negative balance tied to one identity.
#[derive(Debug, Clone)]
pub struct Account {
    owner: Arc<Identity>,
    balance: Decimal,
}

impl Account {
    /// Opens an empty account for `owner`.
    #[must_use]
    pub fn open(owner: Arc<Identity>) -> Self {
        Self {
            owner,
            balance: Decimal::ZERO,
        }
    }

    /// The identity this account belongs to.
    #[must_use]
    pub fn owner(&self) -> &Arc<Identity> {
        &self.owner
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Adds `amount` and returns the new balance.
    ///
    /// # Errors
    ///
    /// `AccountError::InvalidAmount` if `amount <= 0` or the sum overflows.
    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        let next = if amount <= Decimal::ZERO {
            Err(AccountError::InvalidAmount(AmountRejection::NonPositiveDeposit))
        } else {
            self.balance
                .checked_add(amount)
                .ok_or(AccountError::InvalidAmount(AmountRejection::OutOfRange))
        };
        self.commit(next, "deposit.success", "Deposit successful")
    }

    /// Subtracts `amount` and returns the new balance.
    ///
    /// # Errors
    ///
    /// - `AccountError::InvalidAmount` if `amount <= 0`
    /// - `AccountError::InsufficientFunds` if `amount` exceeds the balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        let next = if amount <= Decimal::ZERO {
            Err(AccountError::InvalidAmount(
                AmountRejection::NonPositiveWithdrawal,
            ))
        } else if amount > self.balance {
            Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            })
        } else {
            Ok(self.balance - amount)
        };
        self.commit(next, "withdraw.success", "Withdrawal successful")
    }

    fn commit(
        &mut self,
        next: Result<Decimal, AccountError>,
        success_key: &'static str,
        success_msg: &'static str,
    ) -> Result<Decimal, AccountError> {
        match next {
            Ok(balance) => {
                debug_assert!(balance >= Decimal::ZERO);
                self.balance = balance;
                info!(
                    message_key = success_key,
                    name = %self.owner.name(),
                    balance = %balance,
                    "{success_msg}"
                );
                Ok(balance)
            }
            Err(e) => {
                warn!(
                    message_key = e.message_key(),
                    name = %self.owner.name(),
                    balance = %self.balance,
                    "{e}"
                );
                Err(e)
            }
        }
    }

    /// Owner details and current balance.
    #[must_use]
    pub fn view_balance(&self) -> BalanceView {
        BalanceView {
            owner: self.owner.describe(),
            balance: self.balance,
        }
    }
}
