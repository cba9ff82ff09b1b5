//! Per-name account storage.
//!
//! Each account lives in a `DashMap` entry; holding the entry's `RefMut`
//! serializes every read-modify-write on that account.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;

use super::Account;
use crate::identity::Identity;

/// Accounts keyed by owner name.
#[derive(Debug, Default)]
pub struct AccountBook {
    accounts: DashMap<String, Account>,
}

impl AccountBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `identity` via `register` and opens a fresh account for it,
    /// replacing any account previously held under the same name.
    ///
    /// The entry lock is held across both steps, so concurrent operations on
    /// that name never pair the new identity with the old balance.
    pub fn reopen<F>(&self, identity: Identity, register: F) -> Arc<Identity>
    where
        F: FnOnce(Identity) -> Arc<Identity>,
    {
        let entry = self.accounts.entry(identity.name().to_string());
        let owner = register(identity);
        entry.insert(Account::open(Arc::clone(&owner)));
        owner
    }

    /// Runs `op` against the account for `name`, opening it lazily.
    ///
    /// `resolve_owner` is consulted only when no account exists yet; `None`
    /// from it means the name is unknown and `op` is not run.
    pub fn with_account<R, O, F>(&self, name: &str, resolve_owner: O, op: F) -> Option<R>
    where
        O: FnOnce() -> Option<Arc<Identity>>,
        F: FnOnce(&mut Account) -> R,
    {
        let mut account = match self.accounts.entry(name.to_string()) {
            Entry::Occupied(occupied) => occupied.into_ref(),
            Entry::Vacant(vacant) => vacant.insert(Account::open(resolve_owner()?)),
        };
        Some(op(account.value_mut()))
    }

    /// Current balance for `name`, if an account is open.
    #[must_use]
    pub fn balance(&self, name: &str) -> Option<Decimal> {
        self.accounts.get(name).map(|account| account.balance())
    }

    /// Number of open accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no account is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
