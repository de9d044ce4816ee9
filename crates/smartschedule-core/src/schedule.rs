//! [`ScheduleStore`] — the authoritative in-memory lesson collection.
//!
//! Every mutation updates memory first, then writes the whole resulting
//! collection through the injected [`SchedulePersistence`]. A failed write is
//! returned to the caller; the in-memory change stands either way.

use chrono::NaiveDate;
use tracing::info;

use crate::{
  Result,
  lesson::{DayOfWeek, Lesson, LessonId},
  persistence::SchedulePersistence,
  query, transfer,
};

pub struct ScheduleStore<P> {
  lessons:     Vec<Lesson>,
  persistence: P,
}

impl<P: SchedulePersistence> ScheduleStore<P> {
  /// Create a store populated from `persistence`.
  pub fn open(persistence: P) -> Self {
    let lessons = persistence.load();
    Self { lessons, persistence }
  }

  pub fn persistence(&self) -> &P { &self.persistence }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The collection in storage order, which carries no meaning.
  pub fn lessons(&self) -> &[Lesson] { &self.lessons }

  pub fn get(&self, id: &LessonId) -> Option<&Lesson> {
    self.lessons.iter().find(|l| &l.id == id)
  }

  pub fn lessons_for_date(&self, date: NaiveDate) -> Vec<&Lesson> {
    query::lessons_for_date(&self.lessons, date)
  }

  pub fn lessons_for_weekday(&self, day: DayOfWeek) -> Vec<&Lesson> {
    query::lessons_for_weekday(&self.lessons, day)
  }

  pub fn week_grid(&self) -> [Vec<&Lesson>; 7] { query::week_grid(&self.lessons) }

  pub fn export_json(&self) -> Result<String> { transfer::export_json(&self.lessons) }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Append `lesson`. Ids are not checked for duplicates.
  pub fn add_lesson(&mut self, lesson: Lesson) -> Result<()> {
    self.lessons.push(lesson);
    self.persist()
  }

  /// Replace the first lesson with `id` by `lesson` wholesale. The
  /// replacement always keeps `id`, whatever id it carried.
  ///
  /// Returns `false`, leaving the collection unchanged, if no lesson has
  /// that id.
  pub fn update_lesson(&mut self, id: &LessonId, mut lesson: Lesson) -> Result<bool> {
    let found = match self.lessons.iter_mut().find(|l| &l.id == id) {
      Some(slot) => {
        lesson.id = id.clone();
        *slot = lesson;
        true
      }
      None => false,
    };
    self.persist()?;
    Ok(found)
  }

  /// Remove every lesson with `id` and return how many were removed.
  pub fn delete_lesson(&mut self, id: &LessonId) -> Result<usize> {
    let before = self.lessons.len();
    self.lessons.retain(|l| &l.id != id);
    let removed = before - self.lessons.len();
    self.persist()?;
    Ok(removed)
  }

  /// Swap in an entirely new collection.
  pub fn replace_all(&mut self, lessons: Vec<Lesson>) -> Result<()> {
    self.lessons = lessons;
    self.persist()
  }

  /// Replace the collection with the contents of a backup file.
  ///
  /// A file that fails to parse leaves the collection untouched and returns
  /// [`crate::Error::Import`]. Returns the number of lessons imported.
  pub fn import_json(&mut self, text: &str) -> Result<usize> {
    let lessons = transfer::parse_import(text)?;
    let count = lessons.len();
    info!(count, "importing schedule");
    self.replace_all(lessons)?;
    Ok(count)
  }

  /// Drop every lesson and remove the stored collection.
  pub fn clear(&mut self) -> Result<()> {
    self.lessons.clear();
    self.persistence.clear()
  }

  fn persist(&self) -> Result<()> { self.persistence.save(&self.lessons) }
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};

  use super::*;
  use crate::{
    Error, JsonPersistence,
    kv::{KeyValueStore, MemoryStore, UnavailableStore},
    lesson::NewLesson,
    persistence::LESSONS_KEY,
  };

  /// Records every snapshot it is asked to save.
  #[derive(Default)]
  struct RecordingPort {
    initial: Vec<Lesson>,
    saves:   RefCell<Vec<Vec<Lesson>>>,
    cleared: Cell<bool>,
  }

  impl SchedulePersistence for RecordingPort {
    fn load(&self) -> Vec<Lesson> { self.initial.clone() }

    fn save(&self, lessons: &[Lesson]) -> Result<()> {
      self.saves.borrow_mut().push(lessons.to_vec());
      Ok(())
    }

    fn clear(&self) -> Result<()> {
      self.cleared.set(true);
      Ok(())
    }
  }

  fn lesson(id: &str, day: DayOfWeek, start: &str) -> Lesson {
    let mut input = NewLesson::new(format!("subject {id}"));
    input.day_of_week = day;
    input.start_time = start.into();
    input.build_with_id(LessonId::from(id)).unwrap()
  }

  fn seeded() -> ScheduleStore<RecordingPort> {
    ScheduleStore::open(RecordingPort {
      initial: vec![
        lesson("1", DayOfWeek::MONDAY, "09:00"),
        lesson("2", DayOfWeek::MONDAY, "08:00"),
        lesson("3", DayOfWeek::TUESDAY, "10:00"),
      ],
      ..Default::default()
    })
  }

  #[test]
  fn open_loads_snapshot() {
    let store = seeded();
    assert_eq!(store.lessons().len(), 3);
    assert!(store.persistence().saves.borrow().is_empty());
  }

  #[test]
  fn every_mutation_persists_full_collection() {
    let mut store = seeded();
    store.add_lesson(lesson("4", DayOfWeek::FRIDAY, "12:00")).unwrap();
    store.delete_lesson(&LessonId::from("1")).unwrap();

    let saves = store.persistence().saves.borrow();
    assert_eq!(saves.len(), 2);
    assert_eq!(saves[0].len(), 4);
    assert_eq!(saves[1], store.lessons());
  }

  #[test]
  fn add_does_not_check_for_duplicate_ids() {
    let mut store = seeded();
    store.add_lesson(lesson("1", DayOfWeek::SUNDAY, "07:00")).unwrap();
    assert_eq!(store.lessons().iter().filter(|l| l.id.as_str() == "1").count(), 2);
  }

  #[test]
  fn update_replaces_first_match_wholesale() {
    let mut store = seeded();
    let replacement = lesson("2", DayOfWeek::SATURDAY, "15:30");
    assert!(store.update_lesson(&LessonId::from("2"), replacement.clone()).unwrap());
    assert_eq!(store.get(&LessonId::from("2")), Some(&replacement));
    assert_eq!(store.lessons().len(), 3);
  }

  #[test]
  fn update_keeps_the_original_id() {
    let mut store = seeded();
    let replacement = lesson("99", DayOfWeek::FRIDAY, "11:00");
    assert!(store.update_lesson(&LessonId::from("3"), replacement).unwrap());
    assert!(store.get(&LessonId::from("99")).is_none());
    let updated = store.get(&LessonId::from("3")).unwrap();
    assert_eq!(updated.day_of_week, DayOfWeek::FRIDAY);
    assert_eq!(updated.start_time, "11:00");
  }

  #[test]
  fn update_of_unknown_id_changes_nothing() {
    let mut store = seeded();
    let before = store.lessons().to_vec();
    let matched = store
      .update_lesson(&LessonId::from("nope"), lesson("nope", DayOfWeek::MONDAY, "01:00"))
      .unwrap();
    assert!(!matched);
    assert_eq!(store.lessons(), before);
  }

  #[test]
  fn delete_removes_every_entry_with_id() {
    let mut store = seeded();
    store.add_lesson(lesson("1", DayOfWeek::MONDAY, "18:00")).unwrap();
    assert_eq!(store.delete_lesson(&LessonId::from("1")).unwrap(), 2);
    assert!(store.get(&LessonId::from("1")).is_none());
    assert!(
      store
        .lessons_for_weekday(DayOfWeek::MONDAY)
        .iter()
        .all(|l| l.id.as_str() != "1")
    );
    assert_eq!(store.delete_lesson(&LessonId::from("1")).unwrap(), 0);
  }

  #[test]
  fn store_projections_sort_by_start_time() {
    let store = seeded();
    let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    let ids: Vec<_> = store.lessons_for_date(monday).iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(store.week_grid()[1].len(), 1);
  }

  #[test]
  fn save_failure_keeps_in_memory_change() {
    let mut store = ScheduleStore::open(JsonPersistence::new(UnavailableStore));
    assert!(store.lessons().is_empty());

    let result = store.add_lesson(lesson("1", DayOfWeek::MONDAY, "09:00"));
    assert!(matches!(result, Err(Error::Persist(_))));
    assert_eq!(store.lessons().len(), 1);

    let result = store.delete_lesson(&LessonId::from("1"));
    assert!(matches!(result, Err(Error::Persist(_))));
    assert!(store.lessons().is_empty());
  }

  #[test]
  fn malformed_import_leaves_collection_untouched() {
    let kv = MemoryStore::new();
    let mut store = ScheduleStore::open(JsonPersistence::new(&kv));
    store.add_lesson(lesson("1", DayOfWeek::MONDAY, "09:00")).unwrap();
    let stored_before = kv.get(LESSONS_KEY).unwrap();
    let memory_before = serde_json::to_string(store.lessons()).unwrap();

    let result = store.import_json("[{\"id\": ");
    assert!(matches!(result, Err(Error::Import(_))));
    assert_eq!(serde_json::to_string(store.lessons()).unwrap(), memory_before);
    assert_eq!(kv.get(LESSONS_KEY).unwrap(), stored_before);
  }

  #[test]
  fn import_replaces_wholesale_and_persists() {
    let kv = MemoryStore::new();
    let mut store = ScheduleStore::open(JsonPersistence::new(&kv));
    store.add_lesson(lesson("old", DayOfWeek::MONDAY, "09:00")).unwrap();

    let backup = transfer::export_json(&[
      lesson("a", DayOfWeek::WEDNESDAY, "10:00"),
      lesson("b", DayOfWeek::THURSDAY, "11:00"),
    ])
    .unwrap();
    assert_eq!(store.import_json(&backup).unwrap(), 2);
    assert!(store.get(&LessonId::from("old")).is_none());

    let reopened = ScheduleStore::open(JsonPersistence::new(&kv));
    assert_eq!(reopened.lessons(), store.lessons());
  }

  #[test]
  fn reopen_sees_persisted_mutations() {
    let kv = MemoryStore::new();
    {
      let mut store = ScheduleStore::open(JsonPersistence::new(&kv));
      store.add_lesson(lesson("1", DayOfWeek::MONDAY, "09:00")).unwrap();
      store.add_lesson(lesson("2", DayOfWeek::MONDAY, "10:00")).unwrap();
      store.delete_lesson(&LessonId::from("1")).unwrap();
    }
    let store = ScheduleStore::open(JsonPersistence::new(&kv));
    let ids: Vec<_> = store.lessons().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["2"]);
  }

  #[test]
  fn clear_empties_memory_and_storage() {
    let mut store = seeded();
    store.clear().unwrap();
    assert!(store.lessons().is_empty());
    assert!(store.persistence().cleared.get());
  }
}
