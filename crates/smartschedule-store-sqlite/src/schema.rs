//! SQL schema for the SmartSchedule SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version for any future migration.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per key. Values are opaque strings (JSON for the lesson
-- collection, 'true'/'false'/'ru'/'en' for preferences).
CREATE TABLE IF NOT EXISTS entries (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

PRAGMA user_version = 1;
";
