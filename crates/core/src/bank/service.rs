//! Bank service: the single entry point request handlers call.

use std::sync::Arc;

use rust_decimal::Decimal;
use teller_shared::AccountRetention;
use tracing::warn;

use crate::account::{Account, AccountBook, BalanceView};
use crate::error::BankError;
use crate::identity::Identity;
use crate::registry::Registry;

/// Owns the process registry and account state.
///
/// All methods are synchronous and take `&self`; share the service behind an
/// `Arc`.
#[derive(Debug, Default)]
pub struct BankService {
    registry: Registry,
    accounts: AccountBook,
    retention: AccountRetention,
}

impl BankService {
    /// Creates an empty service with the given retention policy.
    #[must_use]
    pub fn new(retention: AccountRetention) -> Self {
        Self {
            registry: Registry::new(),
            accounts: AccountBook::new(),
            retention,
        }
    }

    /// Read access to the underlying registry.
    ///
    /// Registration is not reachable from here; re-registering must go
    /// through `create_identity` so the account is reset with it.
    ///
    /// ```compile_fail
    /// use teller_core::{BankService, Identity};
    ///
    /// let bank = BankService::default();
    /// let identity = Identity::create("A", 55, "Male", None).unwrap();
    /// bank.registry().register(identity);
    /// ```
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Active retention policy.
    #[must_use]
    pub const fn retention(&self) -> AccountRetention {
        self.retention
    }

    /// Validates and registers an identity, then opens a fresh account for it.
    ///
    /// Re-registering a name replaces the identity and resets its balance.
    /// Hashing a secret is CPU heavy; async callers should run this on a
    /// blocking thread.
    ///
    /// # Errors
    ///
    /// Any `IdentityError` from validation, wrapped in `BankError::Identity`.
    pub fn create_identity(
        &self,
        name: &str,
        age: i64,
        gender: &str,
        secret: Option<&str>,
    ) -> Result<Arc<Identity>, BankError> {
        let identity = Identity::create(name, age, gender, secret)?;

        let owner = match self.retention {
            AccountRetention::Persistent => self
                .accounts
                .reopen(identity, |identity| self.registry.register(identity)),
            AccountRetention::ResetPerCall => self.registry.register(identity),
        };
        Ok(owner)
    }

    /// Finds an identity by name.
    ///
    /// # Errors
    ///
    /// `BankError::NotFound` if the name is not registered.
    pub fn lookup_identity(&self, name: &str) -> Result<Arc<Identity>, BankError> {
        self.registry.find(name).ok_or_else(|| not_found(name))
    }

    /// Authenticates by name and secret, or by name alone when `secret` is
    /// `None`.
    ///
    /// # Errors
    ///
    /// - `BankError::InvalidCredential` if the secret does not verify or the
    ///   name is unknown while a secret was supplied
    /// - `BankError::NotFound` for an unknown name in name-only mode
    pub fn authenticate(
        &self,
        name: &str,
        secret: Option<&str>,
    ) -> Result<Arc<Identity>, BankError> {
        match secret {
            Some(secret) => self.registry.authenticate(name, secret).ok_or_else(|| {
                warn!(name = %name, message_key = "auth.invalid_credentials", "Failed authentication attempt");
                BankError::InvalidCredential
            }),
            None if self.registry.authenticate_by_name_only(name) => self.lookup_identity(name),
            None => Err(not_found(name)),
        }
    }

    /// Deposits into the named account and returns the new balance.
    ///
    /// # Errors
    ///
    /// `BankError::NotFound` for an unknown name, `BankError::Account` if the
    /// amount is rejected.
    pub fn deposit(&self, name: &str, amount: Decimal) -> Result<Decimal, BankError> {
        self.with_account(name, |account| account.deposit(amount))?
            .map_err(BankError::from)
    }

    /// Withdraws from the named account and returns the new balance.
    ///
    /// # Errors
    ///
    /// `BankError::NotFound` for an unknown name, `BankError::Account` if the
    /// amount is rejected or exceeds the balance.
    pub fn withdraw(&self, name: &str, amount: Decimal) -> Result<Decimal, BankError> {
        self.with_account(name, |account| account.withdraw(amount))?
            .map_err(BankError::from)
    }

    /// Owner details and balance for the named account.
    ///
    /// # Errors
    ///
    /// `BankError::NotFound` for an unknown name.
    pub fn view_balance(&self, name: &str) -> Result<BalanceView, BankError> {
        self.with_account(name, |account| account.view_balance())
    }

    fn with_account<R>(&self, name: &str, op: impl FnOnce(&mut Account) -> R) -> Result<R, BankError> {
        match self.retention {
            AccountRetention::Persistent => self
                .accounts
                .with_account(name, || self.registry.find(name), op)
                .ok_or_else(|| not_found(name)),
            AccountRetention::ResetPerCall => {
                let mut account = Account::open(self.lookup_identity(name)?);
                Ok(op(&mut account))
            }
        }
    }
}

fn not_found(name: &str) -> BankError {
    warn!(name = %name, message_key = "registry.not_found", "User not found");
    BankError::NotFound(name.to_string())
}
