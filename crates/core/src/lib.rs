//! Core account ledger logic for Teller.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Identity validation, balance arithmetic, and the identity registry live
//! here; HTTP, tokens, and message formatting are left to callers.
//!
//! # Modules
//!
//! - `identity` - Validated name/age/gender records
//! - `account` - Balances, amount parsing, and the per-name account book
//! - `registry` - Name-to-identity mapping with authentication
//! - `bank` - The service handlers call into
//! - `auth` - Credential hashing
//! - `error` - Error kinds shared by all operations

pub mod account;
pub mod auth;
pub mod bank;
pub mod error;
pub mod identity;
pub mod registry;

pub use account::{Account, BalanceView};
pub use bank::BankService;
pub use error::{BankError, ErrorKind};
pub use identity::{Age, Gender, Identity, IdentityDetail};
pub use registry::Registry;
