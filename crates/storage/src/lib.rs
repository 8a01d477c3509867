//! SQLite persistence for trove.
//!
//! One table, versioned migrations, and a transactional inventory
//! counter. All calls are synchronous; async layers run them on
//! blocking threads.

mod error;
mod migrations;
mod sqlite;

pub use error::StorageError;
pub use sqlite::Storage;

pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests;
