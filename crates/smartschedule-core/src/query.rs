//! Day and week projections over a lesson collection.
//!
//! Everything here is a pure function of its arguments. Results borrow from
//! the input slice and are ordered by `start_time`; `sort_by` is stable, so
//! lessons sharing a start time keep their collection order.

use chrono::{Days, NaiveDate};

use crate::lesson::{DayOfWeek, Lesson};

/// Monday-zero weekday index of `date`.
pub fn weekday_index(date: NaiveDate) -> DayOfWeek { DayOfWeek::of(date) }

/// Lessons taking place on `date`: dated lessons whose date equals `date`,
/// plus recurring lessons on its weekday.
pub fn lessons_for_date(lessons: &[Lesson], date: NaiveDate) -> Vec<&Lesson> {
  sorted(lessons.iter().filter(|l| l.occurs_on(date)))
}

/// Lessons whose stored `day_of_week` equals `day`.
///
/// Unlike [`lessons_for_date`] this ignores `date` entirely: a dated lesson
/// shows up under its stored weekday, whatever day its date falls on.
pub fn lessons_for_weekday(lessons: &[Lesson], day: DayOfWeek) -> Vec<&Lesson> {
  sorted(lessons.iter().filter(|l| l.day_of_week == day))
}

/// One column per weekday, Monday first, each as [`lessons_for_weekday`].
pub fn week_grid(lessons: &[Lesson]) -> [Vec<&Lesson>; 7] {
  DayOfWeek::ALL.map(|day| lessons_for_weekday(lessons, day))
}

fn sorted<'a>(iter: impl Iterator<Item = &'a Lesson>) -> Vec<&'a Lesson> {
  let mut out: Vec<&Lesson> = iter.collect();
  out.sort_by(|a, b| a.start_time.cmp(&b.start_time));
  out
}

// ─── Calendar navigation ─────────────────────────────────────────────────────

/// The Monday of the week containing `date`. A Sunday belongs to the week
/// that started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
  shift_days(date, -i64::from(weekday_index(date).index()))
}

/// The seven consecutive dates beginning at `start`. Near the end of the
/// representable range the tail repeats the last date.
pub fn week_days(start: NaiveDate) -> [NaiveDate; 7] {
  std::array::from_fn(|i| shift_days(start, i as i64))
}

/// Move `start` by `weeks` whole weeks (negative moves back).
pub fn shift_week(start: NaiveDate, weeks: i64) -> NaiveDate {
  shift_days(start, weeks.saturating_mul(7))
}

pub fn next_day(date: NaiveDate) -> NaiveDate { shift_days(date, 1) }

pub fn previous_day(date: NaiveDate) -> NaiveDate { shift_days(date, -1) }

/// Move `date` by `days` (negative moves back).
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
  let step = Days::new(days.unsigned_abs());
  // Saturate at the ends of chrono's representable range.
  if days >= 0 {
    date.checked_add_days(step).unwrap_or(NaiveDate::MAX)
  } else {
    date.checked_sub_days(step).unwrap_or(NaiveDate::MIN)
  }
}
