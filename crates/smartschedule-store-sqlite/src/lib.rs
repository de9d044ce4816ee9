//! SQLite backend for the SmartSchedule durable key-value store.
//!
//! One file holds every key the application persists: the lesson collection
//! and the display preferences.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
