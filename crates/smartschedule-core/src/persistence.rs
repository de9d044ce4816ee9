//! Whole-collection persistence of lessons as a JSON array under one key.
//!
//! Loading is infallible: a missing key, unparseable contents or a failing
//! backend all produce an empty schedule. Saving reports failure to the
//! caller, but never touches the caller's in-memory collection.

use tracing::{debug, error, warn};

use crate::{Error, Result, kv::KeyValueStore, lesson::Lesson};

/// Key under which the lesson collection is stored.
pub const LESSONS_KEY: &str = "smartschedule_lessons";

/// Snapshot-level storage port used by [`crate::ScheduleStore`].
pub trait SchedulePersistence {
  /// Read the stored collection; empty when nothing usable is stored.
  fn load(&self) -> Vec<Lesson>;

  /// Overwrite the stored collection with `lessons`.
  fn save(&self, lessons: &[Lesson]) -> Result<()>;

  /// Remove the stored collection entirely.
  fn clear(&self) -> Result<()>;
}

// ─── JsonPersistence ─────────────────────────────────────────────────────────

/// [`SchedulePersistence`] over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct JsonPersistence<K> {
  store: K,
  key:   &'static str,
}

impl<K: KeyValueStore> JsonPersistence<K> {
  pub fn new(store: K) -> Self { Self { store, key: LESSONS_KEY } }

  /// The underlying key-value store, e.g. for preferences sharing it.
  pub fn store(&self) -> &K { &self.store }
}

impl<K: KeyValueStore> SchedulePersistence for JsonPersistence<K> {
  fn load(&self) -> Vec<Lesson> {
    let raw = match self.store.get(self.key) {
      Ok(Some(raw)) => raw,
      Ok(None) => {
        debug!(key = self.key, "no stored schedule");
        return Vec::new();
      }
      Err(e) => {
        warn!(key = self.key, error = %e, "durable store unreadable; starting empty");
        return Vec::new();
      }
    };

    match serde_json::from_str::<Vec<Lesson>>(&raw) {
      Ok(lessons) => {
        debug!(key = self.key, count = lessons.len(), "loaded schedule");
        lessons
      }
      Err(e) => {
        warn!(key = self.key, error = %e, "stored schedule is corrupt; starting empty");
        Vec::new()
      }
    }
  }

  fn save(&self, lessons: &[Lesson]) -> Result<()> {
    let json = serde_json::to_string(lessons)?;
    self
      .store
      .set(self.key, &json)
      .map_err(|e| {
        error!(key = self.key, error = %e, "failed to save schedule");
        Error::Persist(Box::new(e))
      })?;
    debug!(key = self.key, count = lessons.len(), "saved schedule");
    Ok(())
  }

  fn clear(&self) -> Result<()> {
    self
      .store
      .remove(self.key)
      .map_err(|e| Error::Persist(Box::new(e)))
  }
}
