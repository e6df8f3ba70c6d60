//! Data repositories
//!
//! Provides the persistence layer for calculation history.

pub mod history;

pub use history::{HistoryStore, PersistenceError};
