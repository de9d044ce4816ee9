//! One function per subcommand. Each calls into the schedule store and
//! prints the result.

use std::path::Path;

use anyhow::{Context as _, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use smartschedule_core::{
  JsonPersistence, ScheduleStore,
  kv::KeyValueStore,
  lesson::{DEFAULT_COLOR, DayOfWeek, LessonId, NEW_LESSON_COLOR, NewLesson, suggested_color},
  prefs::Preferences,
  query,
  transfer::EXPORT_FILE_NAME,
};
use tracing::info;

use crate::{AddArgs, Command, EditArgs, PrefsArgs, render};

type Schedule<K> = ScheduleStore<JsonPersistence<K>>;

pub fn run<K: KeyValueStore>(command: Command, schedule: &mut Schedule<K>) -> Result<()> {
  let prefs = Preferences::load(schedule.persistence().store());
  let today = Local::now().date_naive();

  match command {
    Command::Add(args) => add(schedule, args),
    Command::Edit(args) => edit(schedule, args),
    Command::Rm { id } => remove(schedule, &LessonId::from(id)),
    Command::Day { date, offset } => {
      let date = query::shift_days(date.unwrap_or(today), offset);
      print!("{}", render::day(&schedule.lessons_for_date(date), date, today, prefs.language));
      Ok(())
    }
    Command::Week { date, offset } => {
      let start = query::shift_week(query::week_start(date.unwrap_or(today)), offset);
      print!("{}", render::week(&schedule.week_grid(), start, prefs.language));
      Ok(())
    }
    Command::List => {
      print!("{}", render::listing(schedule.lessons(), prefs.language));
      Ok(())
    }
    Command::Export { path } => {
      let path = path.unwrap_or_else(|| EXPORT_FILE_NAME.into());
      export(schedule, &path)
    }
    Command::Import { path } => import(schedule, &path, prefs),
    Command::Clear { yes } => {
      if !yes {
        bail!("refusing to delete every lesson without --yes");
      }
      schedule.clear().context("failed to clear stored schedule")
    }
    Command::Prefs(args) => update_prefs(schedule.persistence().store(), prefs, args),
  }
}

fn day_of_week(day: Option<u8>, date: Option<NaiveDate>) -> Result<DayOfWeek> {
  match (day, date) {
    (Some(d), _) => Ok(DayOfWeek::new(d)?),
    // --date without --day: take the weekday from the date.
    (None, Some(date)) => Ok(DayOfWeek::of(date)),
    (None, None) => Ok(DayOfWeek::MONDAY),
  }
}

fn add<K: KeyValueStore>(schedule: &mut Schedule<K>, args: AddArgs) -> Result<()> {
  let color = args.color.unwrap_or_else(|| {
    let suggested = suggested_color(&args.subject);
    let color = if suggested == DEFAULT_COLOR { NEW_LESSON_COLOR } else { suggested };
    color.to_owned()
  });
  let lesson = NewLesson {
    subject: args.subject,
    teacher: args.teacher,
    room: args.room,
    start_time: args.start,
    end_time: args.end,
    color,
    day_of_week: day_of_week(args.day, args.date)?,
    date: args.date,
  }
  .build()?;

  let id = lesson.id.clone();
  schedule.add_lesson(lesson).context("lesson added but not saved")?;
  info!(%id, "added lesson");
  println!("{id}");
  Ok(())
}

fn edit<K: KeyValueStore>(schedule: &mut Schedule<K>, args: EditArgs) -> Result<()> {
  let id = LessonId::from(args.id);
  let existing = schedule
    .get(&id)
    .ok_or_else(|| anyhow!("no lesson with id {id}"))?;

  let mut input = NewLesson::from(existing);
  let extra = existing.extra.clone();
  if let Some(v) = args.subject {
    input.subject = v;
  }
  if let Some(v) = args.teacher {
    input.teacher = v;
  }
  if let Some(v) = args.room {
    input.room = v;
  }
  if let Some(v) = args.start {
    input.start_time = v;
  }
  if let Some(v) = args.end {
    input.end_time = v;
  }
  if let Some(v) = args.color {
    input.color = v;
  }
  if let Some(d) = args.day {
    input.day_of_week = DayOfWeek::new(d)?;
  }
  if args.recurring {
    input.date = None;
  } else if let Some(date) = args.date {
    input.date = Some(date);
  }

  let mut replacement = input.build_with_id(id.clone())?;
  replacement.extra = extra;
  schedule
    .update_lesson(&id, replacement)
    .context("lesson updated but not saved")?;
  Ok(())
}

fn remove<K: KeyValueStore>(schedule: &mut Schedule<K>, id: &LessonId) -> Result<()> {
  let removed = schedule.delete_lesson(id).context("lesson deleted but not saved")?;
  if removed == 0 {
    bail!("no lesson with id {id}");
  }
  Ok(())
}

fn export<K: KeyValueStore>(schedule: &Schedule<K>, path: &Path) -> Result<()> {
  let json = schedule.export_json()?;
  std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
  println!("{}", path.display());
  Ok(())
}

fn import<K: KeyValueStore>(
  schedule: &mut Schedule<K>,
  path: &Path,
  prefs: Preferences,
) -> Result<()> {
  let text = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  let count = schedule
    .import_json(&text)
    .with_context(|| prefs.language.labels().import_err)?;
  println!("{count}");
  Ok(())
}

fn update_prefs<K: KeyValueStore>(store: &K, mut prefs: Preferences, args: PrefsArgs) -> Result<()> {
  let changed = args.dark.is_some() || args.notifications.is_some() || args.language.is_some();
  if let Some(v) = args.dark {
    prefs.dark_mode = v;
  }
  if let Some(v) = args.notifications {
    prefs.notifications_enabled = v;
  }
  if let Some(v) = args.language {
    prefs.language = v;
  }
  if changed {
    prefs.save(store).context("failed to save preferences")?;
  }
  println!("dark_mode = {}", prefs.dark_mode);
  println!("notifications_enabled = {}", prefs.notifications_enabled);
  println!("language = {}", prefs.language);
  Ok(())
}

#[cfg(test)]
mod tests {
  use smartschedule_core::kv::MemoryStore;

  use super::*;

  fn schedule(kv: &MemoryStore) -> Schedule<&MemoryStore> {
    ScheduleStore::open(JsonPersistence::new(kv))
  }

  fn add_args(subject: &str) -> AddArgs {
    AddArgs {
      subject: subject.into(),
      teacher: String::new(),
      room:    String::new(),
      start:   "09:00".into(),
      end:     "10:00".into(),
      day:     None,
      date:    None,
      color:   None,
    }
  }

  #[test]
  fn add_defaults_day_from_date_and_color_from_palette() {
    let kv = MemoryStore::new();
    let mut s = schedule(&kv);
    let mut args = add_args("Химия");
    args.date = NaiveDate::from_ymd_opt(2025, 1, 8);
    add(&mut s, args).unwrap();

    let lesson = &s.lessons()[0];
    assert_eq!(lesson.day_of_week, DayOfWeek::WEDNESDAY);
    assert_eq!(lesson.color, "#FFD8B3");

    add(&mut s, add_args("Astronomy")).unwrap();
    assert_eq!(s.lessons()[1].color, NEW_LESSON_COLOR);
    assert_eq!(s.lessons()[1].day_of_week, DayOfWeek::MONDAY);
  }

  #[test]
  fn edit_replaces_selected_fields() {
    let kv = MemoryStore::new();
    let mut s = schedule(&kv);
    add(&mut s, add_args("Русский")).unwrap();
    let id = s.lessons()[0].id.to_string();

    edit(&mut s, EditArgs {
      id,
      subject: None,
      teacher: Some("Сидорова".into()),
      room: None,
      start: Some("11:00".into()),
      end: Some("11:45".into()),
      day: Some(4),
      date: None,
      recurring: false,
      color: None,
    })
    .unwrap();

    let lesson = &s.lessons()[0];
    assert_eq!(lesson.subject, "Русский");
    assert_eq!(lesson.teacher, "Сидорова");
    assert_eq!(lesson.start_time, "11:00");
    assert_eq!(lesson.day_of_week, DayOfWeek::FRIDAY);
  }

  #[test]
  fn edit_keeps_unrecognized_keys() {
    let kv = MemoryStore::new();
    let mut s = schedule(&kv);
    s.import_json(
      r##"[{"id":"1","subject":"Физика","startTime":"09:00","endTime":"10:00","dayOfWeek":0,"notes":"x"}]"##,
    )
    .unwrap();

    edit(&mut s, EditArgs {
      id: "1".into(),
      subject: None,
      teacher: None,
      room: Some("101".into()),
      start: None,
      end: None,
      day: None,
      date: None,
      recurring: false,
      color: None,
    })
    .unwrap();

    let lesson = &s.lessons()[0];
    assert_eq!(lesson.room, "101");
    assert_eq!(lesson.extra.get("notes").and_then(|v| v.as_str()), Some("x"));
  }

  #[test]
  fn edit_and_remove_of_unknown_id_fail() {
    let kv = MemoryStore::new();
    let mut s = schedule(&kv);
    assert!(remove(&mut s, &LessonId::from("missing")).is_err());
    let err = edit(&mut s, EditArgs {
      id: "missing".into(),
      subject: Some("Физика".into()),
      teacher: None,
      room: None,
      start: None,
      end: None,
      day: None,
      date: None,
      recurring: false,
      color: None,
    });
    assert!(err.is_err());
    assert!(s.lessons().is_empty());
  }

  #[test]
  fn failed_import_keeps_schedule_and_reports_label() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "[{").unwrap();

    let kv = MemoryStore::new();
    let mut s = schedule(&kv);
    add(&mut s, add_args("Физика")).unwrap();

    let err = import(&mut s, &file, Preferences::default()).unwrap_err();
    assert_eq!(err.to_string(), "Ошибка при импорте");
    assert_eq!(s.lessons().len(), 1);
  }

  #[test]
  fn export_then_import_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join(EXPORT_FILE_NAME);

    let source = MemoryStore::new();
    let mut s = schedule(&source);
    add(&mut s, add_args("Физика")).unwrap();
    add(&mut s, add_args("Химия")).unwrap();
    export(&s, &file).unwrap();

    let target = MemoryStore::new();
    let mut t = schedule(&target);
    import(&mut t, &file, Preferences::default()).unwrap();
    assert_eq!(t.lessons(), s.lessons());
  }

  #[test]
  fn prefs_are_saved_only_when_changed() {
    let kv = MemoryStore::new();
    update_prefs(&kv, Preferences::default(), PrefsArgs {
      dark: None,
      notifications: None,
      language: None,
    })
    .unwrap();
    assert_eq!(kv.get("language").unwrap(), None);

    update_prefs(&kv, Preferences::default(), PrefsArgs {
      dark: Some(true),
      notifications: None,
      language: Some(smartschedule_core::prefs::Language::En),
    })
    .unwrap();
    let prefs = Preferences::load(&kv);
    assert!(prefs.dark_mode);
    assert_eq!(prefs.language.to_string(), "en");
  }
}
