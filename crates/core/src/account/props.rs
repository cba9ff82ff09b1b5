//! Property-based tests for account balance arithmetic.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{Account, AccountError, AmountRejection};
use crate::identity::Identity;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate zero or negative amounts.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

fn account_with(balance: Decimal) -> Account {
    let owner = Identity::create("Prop", 33, "Other", None).expect("valid identity");
    let mut account = Account::open(Arc::new(owner));
    if balance > Decimal::ZERO {
        account.deposit(balance).expect("seed deposit");
    }
    account
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A positive deposit adds exactly the amount.
    #[test]
    fn prop_deposit_adds_amount(start in positive_amount(), amount in positive_amount()) {
        let mut account = account_with(start);

        let balance = account.deposit(amount).unwrap();

        prop_assert_eq!(balance, start + amount);
        prop_assert_eq!(account.balance(), start + amount);
    }

    /// A non-positive deposit is rejected and changes nothing.
    #[test]
    fn prop_non_positive_deposit_is_noop(start in positive_amount(), amount in non_positive_amount()) {
        let mut account = account_with(start);

        let result = account.deposit(amount);

        prop_assert_eq!(
            result,
            Err(AccountError::InvalidAmount(AmountRejection::NonPositiveDeposit))
        );
        prop_assert_eq!(account.balance(), start);
    }

    /// Withdrawing up to the balance subtracts exactly the amount.
    #[test]
    fn prop_covered_withdrawal_subtracts(start in positive_amount(), pct in 1u32..=100) {
        let mut account = account_with(start);
        let amount = (start * Decimal::from(pct) / Decimal::ONE_HUNDRED).round_dp(2);
        prop_assume!(amount > Decimal::ZERO);

        let balance = account.withdraw(amount).unwrap();

        prop_assert_eq!(balance, start - amount);
        prop_assert!(balance >= Decimal::ZERO);
    }

    /// Withdrawing more than the balance is rejected and changes nothing.
    #[test]
    fn prop_overdraw_is_noop(start in positive_amount(), extra in positive_amount()) {
        let mut account = account_with(start);
        let amount = start + extra;

        let result = account.withdraw(amount);

        prop_assert_eq!(
            result,
            Err(AccountError::InsufficientFunds { requested: amount, available: start })
        );
        prop_assert_eq!(account.balance(), start);
    }

    /// Any sequence of operations keeps the balance non-negative.
    #[test]
    fn prop_balance_never_negative(
        ops in prop::collection::vec((any::<bool>(), -50_000i64..100_000i64), 1..50)
    ) {
        let mut account = account_with(Decimal::ZERO);

        for (is_deposit, cents) in ops {
            let amount = Decimal::new(cents, 2);
            let before = account.balance();
            let result = if is_deposit {
                account.deposit(amount)
            } else {
                account.withdraw(amount)
            };
            if result.is_err() {
                prop_assert_eq!(account.balance(), before);
            }
            prop_assert!(account.balance() >= Decimal::ZERO);
        }
    }

    /// Viewing the balance twice without mutation gives identical results.
    #[test]
    fn prop_view_balance_idempotent(start in positive_amount()) {
        let account = account_with(start);

        prop_assert_eq!(account.view_balance(), account.view_balance());
    }
}
