//! Plain-text rendering of day and week views.

use std::fmt::Write as _;

use chrono::NaiveDate;
use smartschedule_core::{
  lesson::{DayOfWeek, Lesson},
  prefs::Language,
  query,
};

/// Heading for a day: relative name when close to `today`, then weekday and
/// date.
pub fn day_heading(date: NaiveDate, today: NaiveDate, lang: Language) -> String {
  let labels = lang.labels();
  let full = lang.full_day(DayOfWeek::of(date));
  let formatted = lang.format_date(date);
  let relative = match (date - today).num_days() {
    0 => Some(labels.today),
    1 => Some(labels.tomorrow),
    -1 => Some(labels.yesterday),
    _ => None,
  };
  match relative {
    Some(rel) => format!("{rel} · {full}, {formatted}"),
    None => format!("{full}, {formatted}"),
  }
}

/// One line per lesson, or the empty-day label.
pub fn day(lessons: &[&Lesson], date: NaiveDate, today: NaiveDate, lang: Language) -> String {
  let mut out = day_heading(date, today, lang);
  out.push('\n');
  if lessons.is_empty() {
    let _ = writeln!(out, "  {}", lang.labels().no_lessons);
    return out;
  }
  for lesson in lessons {
    let _ = writeln!(out, "  {}", lesson_line(lesson, lang));
  }
  out
}

/// Seven blocks, Monday first. Columns come from the recurring weekday, as
/// in [`query::week_grid`].
pub fn week(grid: &[Vec<&Lesson>; 7], start: NaiveDate, lang: Language) -> String {
  let labels = lang.labels();
  let mut out = format!("{} · {}\n", labels.week, lang.format_date(start));
  for ((day, date), lessons) in DayOfWeek::ALL.iter().zip(query::week_days(start)).zip(grid) {
    let _ = writeln!(out, "{} {}", lang.short_day(*day), lang.format_date(date));
    if lessons.is_empty() {
      out.push_str("  —\n");
    }
    for lesson in lessons {
      let _ = writeln!(out, "  {} {}  [{}]", lesson.start_time, lesson.subject, lesson.id);
    }
  }
  out
}

/// Every lesson with its recurrence, for `list`.
pub fn listing(lessons: &[Lesson], lang: Language) -> String {
  let mut out = format!("{}\n", lang.labels().schedule);
  if lessons.is_empty() {
    let _ = writeln!(out, "  {}", lang.labels().no_lessons);
  }
  for lesson in lessons {
    let when = match lesson.date {
      Some(date) => lang.format_date(date),
      None => lang.full_day(lesson.day_of_week).to_owned(),
    };
    let _ = writeln!(out, "{when:<12} {}", lesson_line(lesson, lang));
  }
  out
}

fn lesson_line(lesson: &Lesson, lang: Language) -> String {
  let mut line = format!("{}–{}  {}", lesson.start_time, lesson.end_time, lesson.subject);
  if !lesson.teacher.is_empty() {
    let _ = write!(line, " · {}", lesson.teacher);
  }
  if !lesson.room.is_empty() {
    let _ = write!(line, " · {} {}", lang.labels().room, lesson.room);
  }
  let _ = write!(line, "  {}  [{}]", lesson.color, lesson.id);
  line
}
