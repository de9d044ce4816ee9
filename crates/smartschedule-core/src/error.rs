//! Error types for `smartschedule-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("lesson subject must not be empty")]
  EmptySubject,

  #[error("day of week out of range: {0} (expected 0..=6)")]
  InvalidDayOfWeek(u8),

  #[error("invalid time of day {0:?} (expected HH:MM)")]
  InvalidTime(String),

  #[error("import rejected: {0}")]
  Import(#[source] serde_json::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// The durable store refused a write. In-memory state is unaffected.
  #[error("persist error: {0}")]
  Persist(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
