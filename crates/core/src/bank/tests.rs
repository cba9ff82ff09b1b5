//! End-to-end scenarios against `BankService`.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use teller_shared::AccountRetention;

use super::BankService;
use crate::account::{AccountError, AmountRejection, parse_amount};
use crate::error::{BankError, ErrorKind};
use crate::identity::{Gender, IdentityDetail};

fn service() -> BankService {
    BankService::new(AccountRetention::Persistent)
}

#[test]
fn scenario_deposit_withdraw_view() {
    let bank = service();
    bank.create_identity("Edison", 20, "Male", None).unwrap();

    assert_eq!(bank.deposit("Edison", dec!(3000)).unwrap(), dec!(3000));
    assert_eq!(bank.withdraw("Edison", dec!(2000)).unwrap(), dec!(1000));

    let view = bank.view_balance("Edison").unwrap();
    assert_eq!(
        view.owner,
        IdentityDetail {
            name: "Edison".into(),
            age: 20,
            gender: Gender::Male,
        }
    );
    assert_eq!(view.balance, dec!(1000));
}

#[test]
fn scenario_negative_deposit_on_fresh_account() {
    let bank = service();
    bank.create_identity("Edison", 20, "Male", None).unwrap();

    let err = bank.deposit("Edison", dec!(-100)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidAmount);
    assert_eq!(bank.view_balance("Edison").unwrap().balance, Decimal::ZERO);
}

#[test]
fn scenario_overdraw_keeps_balance() {
    let bank = service();
    bank.create_identity("Edison", 20, "Male", None).unwrap();
    bank.deposit("Edison", dec!(1000)).unwrap();

    let err = bank.withdraw("Edison", dec!(2000)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    assert_eq!(bank.view_balance("Edison").unwrap().balance, dec!(1000));
}

#[test]
fn scenario_invalid_age() {
    let err = service().create_identity("John", -30, "Male", None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAge);
}

#[test]
fn scenario_invalid_gender() {
    let err = service()
        .create_identity("Jane", 25, "Unknown", None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidGender);
}

#[test]
fn scenario_reregistration_overwrites() {
    let bank = service();
    bank.create_identity("A", 20, "Male", None).unwrap();
    bank.create_identity("A", 61, "Other", None).unwrap();

    let found = bank.lookup_identity("A").unwrap();
    assert_eq!(found.age().years(), 61);
    assert_eq!(found.gender(), Gender::Other);
    assert_eq!(bank.registry().len(), 1);
}

#[test]
fn reregistration_resets_balance() {
    let bank = service();
    bank.create_identity("A", 20, "Male", None).unwrap();
    bank.deposit("A", dec!(500)).unwrap();

    bank.create_identity("A", 21, "Male", None).unwrap();

    let view = bank.view_balance("A").unwrap();
    assert_eq!(view.balance, Decimal::ZERO);
    assert_eq!(view.owner.age, 21);
}

#[test]
fn lookup_and_account_owner_agree_after_reregistration() {
    let bank = service();
    bank.create_identity("A", 20, "Male", None).unwrap();
    bank.deposit("A", dec!(100)).unwrap();

    bank.create_identity("A", 55, "Female", None).unwrap();

    let registered = bank.lookup_identity("A").unwrap().describe();
    let view = bank.view_balance("A").unwrap();
    assert_eq!(view.owner, registered);
    assert_eq!(view.owner.age, 55);
    assert_eq!(view.balance, Decimal::ZERO);
    assert_eq!(bank.registry().find("A").unwrap().age().years(), 55);
}

#[test]
fn failed_registration_leaves_existing_identity() {
    let bank = service();
    bank.create_identity("A", 20, "Male", None).unwrap();
    bank.deposit("A", dec!(5)).unwrap();

    assert!(bank.create_identity("A", 0, "Male", None).is_err());

    assert_eq!(bank.lookup_identity("A").unwrap().age().years(), 20);
    assert_eq!(bank.view_balance("A").unwrap().balance, dec!(5));
}

#[test]
fn unknown_name_is_not_found() {
    let bank = service();

    assert!(matches!(bank.lookup_identity("ghost"), Err(BankError::NotFound(_))));
    assert_eq!(
        bank.deposit("ghost", dec!(1)).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        bank.withdraw("ghost", dec!(1)).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(bank.view_balance("ghost").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn non_numeric_amount_never_reaches_account() {
    let bank = service();
    bank.create_identity("Edison", 20, "Male", None).unwrap();

    let err = parse_amount(&serde_json::json!("lots")).unwrap_err();

    assert_eq!(err, AccountError::InvalidAmount(AmountRejection::NotANumber));
    assert_eq!(BankError::from(err).kind(), ErrorKind::InvalidAmount);
    assert_eq!(bank.view_balance("Edison").unwrap().balance, Decimal::ZERO);
}

#[test]
fn view_balance_is_idempotent() {
    let bank = service();
    bank.create_identity("Edison", 20, "Male", None).unwrap();
    bank.deposit("Edison", dec!(77.10)).unwrap();

    assert_eq!(
        bank.view_balance("Edison").unwrap(),
        bank.view_balance("Edison").unwrap()
    );
}

#[test]
fn authenticate_with_and_without_secret() {
    let bank = service();
    bank.create_identity("Ada", 36, "Female", Some("engine"))
        .unwrap();
    bank.create_identity("Edison", 20, "Male", None).unwrap();

    assert_eq!(bank.authenticate("Ada", Some("engine")).unwrap().name(), "Ada");
    assert!(matches!(
        bank.authenticate("Ada", Some("wrong")),
        Err(BankError::InvalidCredential)
    ));
    assert!(matches!(
        bank.authenticate("Nobody", Some("engine")),
        Err(BankError::InvalidCredential)
    ));
    // Identity without a credential cannot pass a secret check.
    assert!(matches!(
        bank.authenticate("Edison", Some("")),
        Err(BankError::InvalidCredential)
    ));

    assert_eq!(bank.authenticate("Edison", None).unwrap().name(), "Edison");
    assert!(matches!(
        bank.authenticate("Nobody", None),
        Err(BankError::NotFound(_))
    ));
}

#[test]
fn reset_per_call_starts_every_call_from_zero() {
    let bank = BankService::new(AccountRetention::ResetPerCall);
    bank.create_identity("Edison", 20, "Male", None).unwrap();

    assert_eq!(bank.deposit("Edison", dec!(3000)).unwrap(), dec!(3000));
    assert_eq!(bank.deposit("Edison", dec!(10)).unwrap(), dec!(10));
    assert_eq!(
        bank.withdraw("Edison", dec!(1)).unwrap_err().kind(),
        ErrorKind::InsufficientFunds
    );
    assert_eq!(bank.view_balance("Edison").unwrap().balance, Decimal::ZERO);
}

#[test]
fn concurrent_mixed_operations_preserve_total() {
    let bank = Arc::new(service());
    bank.create_identity("shared", 30, "Other", None).unwrap();
    bank.deposit("shared", dec!(1000)).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let bank = Arc::clone(&bank);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    if i % 2 == 0 {
                        bank.deposit("shared", dec!(2)).unwrap();
                    } else {
                        bank.withdraw("shared", dec!(1)).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // 2 depositors * 100 * 2 - 2 withdrawers * 100 * 1
    assert_eq!(bank.view_balance("shared").unwrap().balance, dec!(1200));
}
