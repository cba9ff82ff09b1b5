//! Inbound operations over the registry and account book.

pub mod service;

#[cfg(test)]
mod tests;

pub use service::BankService;
