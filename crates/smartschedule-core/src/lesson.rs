//! Lesson — one scheduled class, either a recurring weekly slot or a one-off
//! occurrence anchored to a calendar date.
//!
//! The wire shape is the camelCase JSON object persisted by the durable store
//! and written to export files:
//! `{id, subject, teacher, room, startTime, endTime, color, dayOfWeek, date?}`.
//! `teacher`, `room` and `color` may be absent and default to empty. Keys
//! outside that set are carried through untouched.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque lesson identifier. Freshly created lessons get a UUID v4; imported
/// ids are kept verbatim whatever their form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
  pub fn generate() -> Self { Self(Uuid::new_v4().hyphenated().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for LessonId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for LessonId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl fmt::Display for LessonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Weekday index ───────────────────────────────────────────────────────────

/// Weekday index with Monday = 0 … Sunday = 6.
///
/// Construction is checked, including on deserialization, so a stored lesson
/// can never carry an out-of-range day.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
  pub const MONDAY: Self = Self(0);
  pub const TUESDAY: Self = Self(1);
  pub const WEDNESDAY: Self = Self(2);
  pub const THURSDAY: Self = Self(3);
  pub const FRIDAY: Self = Self(4);
  pub const SATURDAY: Self = Self(5);
  pub const SUNDAY: Self = Self(6);

  pub const ALL: [Self; 7] = [
    Self::MONDAY,
    Self::TUESDAY,
    Self::WEDNESDAY,
    Self::THURSDAY,
    Self::FRIDAY,
    Self::SATURDAY,
    Self::SUNDAY,
  ];

  pub fn new(index: u8) -> Result<Self> {
    if index <= 6 { Ok(Self(index)) } else { Err(Error::InvalidDayOfWeek(index)) }
  }

  pub fn index(self) -> u8 { self.0 }

  /// The weekday `date` falls on.
  pub fn of(date: NaiveDate) -> Self { Self::from(date.weekday()) }
}

impl From<Weekday> for DayOfWeek {
  fn from(w: Weekday) -> Self {
    // chrono counts from Monday already; no Sunday-first remap needed.
    Self(w.num_days_from_monday() as u8)
  }
}

impl TryFrom<u8> for DayOfWeek {
  type Error = Error;

  fn try_from(index: u8) -> Result<Self> { Self::new(index) }
}

impl From<DayOfWeek> for u8 {
  fn from(d: DayOfWeek) -> Self { d.0 }
}

// ─── Lesson ──────────────────────────────────────────────────────────────────

/// A single timetable entry.
///
/// `date` and `day_of_week` are stored independently and never cross-checked:
/// a dated lesson keeps whatever `day_of_week` it was created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  pub id:          LessonId,
  pub subject:     String,
  #[serde(default)]
  pub teacher:     String,
  #[serde(default)]
  pub room:        String,
  /// `"HH:MM"`, 24-hour. Fixed width, so string order is chronological.
  pub start_time:  String,
  pub end_time:    String,
  /// Hex color token; rendering only.
  #[serde(default)]
  pub color:       String,
  pub day_of_week: DayOfWeek,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date:        Option<NaiveDate>,
  /// Unrecognized keys from stored or imported records, written back as-is.
  #[serde(flatten)]
  pub extra:       Map<String, Value>,
}

impl Lesson {
  /// `true` for a weekly slot, `false` for a one-off dated occurrence.
  pub fn is_recurring(&self) -> bool { self.date.is_none() }

  /// Whether this lesson takes place on `date`.
  ///
  /// A dated lesson matches only its own date; a recurring lesson matches
  /// every date whose weekday equals `day_of_week`.
  pub fn occurs_on(&self, date: NaiveDate) -> bool {
    match self.date {
      Some(own) => own == date,
      None => self.day_of_week == DayOfWeek::of(date),
    }
  }
}

// ─── Palette ─────────────────────────────────────────────────────────────────

/// Colors offered when creating a lesson, keyed by the stock subject names.
pub const SUBJECT_COLORS: [(&str, &str); 10] = [
  ("Математика", "#A5D6FF"),
  ("Русский", "#FFB3BA"),
  ("Английский", "#BAFFC9"),
  ("Физика", "#E0BBE4"),
  ("Химия", "#FFD8B3"),
  ("История", "#B3E5FC"),
  ("География", "#C8E6C9"),
  ("Биология", "#F8BBD0"),
  ("Информатика", "#CFE9FB"),
  ("Физкультура", "#FDD835"),
];

/// Fallback for subjects without a palette entry.
pub const DEFAULT_COLOR: &str = "#E8E8E8";

/// Color preselected for a new lesson.
pub const NEW_LESSON_COLOR: &str = "#A5D6FF";

/// Palette color for a stock subject name, or [`DEFAULT_COLOR`].
pub fn suggested_color(subject: &str) -> &'static str {
  let subject = subject.trim();
  SUBJECT_COLORS
    .iter()
    .find(|(name, _)| *name == subject)
    .map_or(DEFAULT_COLOR, |&(_, color)| color)
}

// ─── Time of day ─────────────────────────────────────────────────────────────

/// Parse a time of day and return it in canonical zero-padded `"HH:MM"` form.
pub fn normalize_time(input: &str) -> Result<String> {
  NaiveTime::parse_from_str(input.trim(), "%H:%M")
    .map(|t| t.format("%H:%M").to_string())
    .map_err(|_| Error::InvalidTime(input.to_owned()))
}

// ─── NewLesson ───────────────────────────────────────────────────────────────

/// Input for creating (or fully replacing) a lesson.
///
/// Defaults match an empty creation form: Monday, 09:00–10:00, first palette
/// color, no teacher or room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLesson {
  pub subject:     String,
  pub teacher:     String,
  pub room:        String,
  pub start_time:  String,
  pub end_time:    String,
  pub color:       String,
  pub day_of_week: DayOfWeek,
  pub date:        Option<NaiveDate>,
}

impl Default for NewLesson {
  fn default() -> Self {
    Self {
      subject:     String::new(),
      teacher:     String::new(),
      room:        String::new(),
      start_time:  "09:00".to_owned(),
      end_time:    "10:00".to_owned(),
      color:       NEW_LESSON_COLOR.to_owned(),
      day_of_week: DayOfWeek::MONDAY,
      date:        None,
    }
  }
}

impl NewLesson {
  pub fn new(subject: impl Into<String>) -> Self {
    Self { subject: subject.into(), ..Self::default() }
  }

  /// Build a lesson with a freshly generated id.
  pub fn build(self) -> Result<Lesson> { self.build_with_id(LessonId::generate()) }

  /// Build a lesson under an existing id, e.g. as a full replacement for
  /// [`crate::ScheduleStore::update_lesson`].
  ///
  /// Rejects a blank subject and malformed times. Start and end are not
  /// compared with each other.
  pub fn build_with_id(self, id: LessonId) -> Result<Lesson> {
    if self.subject.trim().is_empty() {
      return Err(Error::EmptySubject);
    }
    Ok(Lesson {
      id,
      subject: self.subject,
      teacher: self.teacher,
      room: self.room,
      start_time: normalize_time(&self.start_time)?,
      end_time: normalize_time(&self.end_time)?,
      color: self.color,
      day_of_week: self.day_of_week,
      date: self.date,
      extra: Map::new(),
    })
  }
}

impl From<&Lesson> for NewLesson {
  fn from(l: &Lesson) -> Self {
    Self {
      subject:     l.subject.clone(),
      teacher:     l.teacher.clone(),
      room:        l.room.clone(),
      start_time:  l.start_time.clone(),
      end_time:    l.end_time.clone(),
      color:       l.color.clone(),
      day_of_week: l.day_of_week,
      date:        l.date,
    }
  }
}
