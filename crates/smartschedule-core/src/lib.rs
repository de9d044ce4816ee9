//! Core types for the SmartSchedule timetable.
//!
//! This crate holds the lesson model, the pure day/week projections, and the
//! persistence contract. It is deliberately free of database dependencies;
//! durable backends implement [`kv::KeyValueStore`] in their own crates.

pub mod error;
pub mod kv;
pub mod lesson;
pub mod persistence;
pub mod prefs;
pub mod query;
pub mod schedule;
pub mod transfer;

pub use error::{Error, Result};
pub use lesson::{DayOfWeek, Lesson, LessonId, NewLesson};
pub use persistence::{JsonPersistence, SchedulePersistence};
pub use schedule::ScheduleStore;
