//! Storage module for wallet persistence

pub mod persistence;

pub use persistence::{Storage, StorageConfig, StorageError, WalletState};
