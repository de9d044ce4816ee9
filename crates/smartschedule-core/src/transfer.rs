//! Backup files: a pretty-printed JSON array of lessons.

use crate::{Error, Result, lesson::Lesson};

/// File name offered for exported backups.
pub const EXPORT_FILE_NAME: &str = "smartschedule_backup.json";

/// Render `lessons` as a pretty-printed JSON array.
pub fn export_json(lessons: &[Lesson]) -> Result<String> {
  Ok(serde_json::to_string_pretty(lessons)?)
}

/// Parse an imported backup.
///
/// The whole file is rejected if it is not JSON or if any element does not
/// have the lesson shape; there is no partial import.
pub fn parse_import(text: &str) -> Result<Vec<Lesson>> {
  serde_json::from_str(text).map_err(Error::Import)
}
