//! The durable key-value store abstraction.
//!
//! Lessons and preferences are persisted as strings under fixed keys. The
//! trait is implemented by storage backends (e.g. `smartschedule-store-sqlite`)
//! and by the two in-process stores below.

use std::{
  collections::HashMap,
  sync::{Mutex, PoisonError},
};

use thiserror::Error;

/// String-keyed, string-valued durable storage.
///
/// Calls are synchronous: a successful `set` has reached the backend by the
/// time it returns.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`, or `None` if the key is absent.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `key`, overwriting any previous value.
  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Remove `key`. Removing an absent key is not an error.
  fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
  type Error = S::Error;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> { (**self).get(key) }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> { (**self).set(key, value) }

  fn remove(&self, key: &str) -> Result<(), Self::Error> { (**self).remove(key) }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// A process-local store. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    // A panic mid-insert cannot leave a HashMap half-written; keep going.
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl KeyValueStore for MemoryStore {
  type Error = std::convert::Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.entries().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    self.entries().insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    self.entries().remove(key);
    Ok(())
  }
}

// ─── UnavailableStore ────────────────────────────────────────────────────────

/// Returned by every [`UnavailableStore`] operation.
#[derive(Debug, Error)]
#[error("no durable store is available")]
pub struct Unavailable;

/// Stand-in for an execution context without durable storage. Reads and
/// writes all fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
  type Error = Unavailable;

  fn get(&self, _key: &str) -> Result<Option<String>, Self::Error> { Err(Unavailable) }

  fn set(&self, _key: &str, _value: &str) -> Result<(), Self::Error> { Err(Unavailable) }

  fn remove(&self, _key: &str) -> Result<(), Self::Error> { Err(Unavailable) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
  }

  #[test]
  fn unavailable_store_fails_everything() {
    let store = UnavailableStore;
    assert!(store.get("k").is_err());
    assert!(store.set("k", "v").is_err());
    assert!(store.remove("k").is_err());
  }

  #[test]
  fn borrowed_store_shares_contents() {
    let store = MemoryStore::new();
    let by_ref = &store;
    by_ref.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
  }
}
