//! Display preferences and localized strings.
//!
//! Preferences live in the same key-value store as the schedule, one scalar
//! per key, and are independent of the lesson model.

use chrono::NaiveDate;
use strum::{AsRefStr, Display, EnumString};
use tracing::warn;

use crate::{Error, Result, kv::KeyValueStore, lesson::DayOfWeek};

pub const DARK_MODE_KEY: &str = "darkMode";
pub const NOTIFICATIONS_KEY: &str = "notificationsEnabled";
pub const LANGUAGE_KEY: &str = "language";

// ─── Language ────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Display,
  EnumString,
  AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
  #[default]
  Ru,
  En,
}

/// Fixed UI strings for one language.
#[derive(Debug, Clone, Copy)]
pub struct Labels {
  pub schedule:   &'static str,
  pub week:       &'static str,
  pub today:      &'static str,
  pub tomorrow:   &'static str,
  pub yesterday:  &'static str,
  pub room:       &'static str,
  pub no_lessons: &'static str,
  pub import_err: &'static str,
}

const RU_LABELS: Labels = Labels {
  schedule:   "Расписание",
  week:       "Неделя",
  today:      "Сегодня",
  tomorrow:   "Завтра",
  yesterday:  "Вчера",
  room:       "Кабинет",
  no_lessons: "Нет уроков",
  import_err: "Ошибка при импорте",
};

const EN_LABELS: Labels = Labels {
  schedule:   "Schedule",
  week:       "Week",
  today:      "Today",
  tomorrow:   "Tomorrow",
  yesterday:  "Yesterday",
  room:       "Room",
  no_lessons: "No lessons",
  import_err: "Import error",
};

const DAYS_SHORT_RU: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];
const DAYS_SHORT_EN: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const DAYS_FULL_RU: [&str; 7] =
  ["Понедельник", "Вторник", "Среда", "Четверг", "Пятница", "Суббота", "Воскресенье"];
const DAYS_FULL_EN: [&str; 7] =
  ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

impl Language {
  pub fn labels(self) -> &'static Labels {
    match self {
      Self::Ru => &RU_LABELS,
      Self::En => &EN_LABELS,
    }
  }

  pub fn short_day(self, day: DayOfWeek) -> &'static str {
    let names = match self {
      Self::Ru => &DAYS_SHORT_RU,
      Self::En => &DAYS_SHORT_EN,
    };
    names[usize::from(day.index())]
  }

  pub fn full_day(self, day: DayOfWeek) -> &'static str {
    let names = match self {
      Self::Ru => &DAYS_FULL_RU,
      Self::En => &DAYS_FULL_EN,
    };
    names[usize::from(day.index())]
  }

  /// Locale-style short date: `06.01.2025` (ru) or `1/6/2025` (en).
  pub fn format_date(self, date: NaiveDate) -> String {
    match self {
      Self::Ru => date.format("%d.%m.%Y").to_string(),
      Self::En => date.format("%-m/%-d/%Y").to_string(),
    }
  }
}

// ─── Preferences ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
  pub dark_mode:             bool,
  pub notifications_enabled: bool,
  pub language:              Language,
}

impl Default for Preferences {
  fn default() -> Self {
    Self { dark_mode: false, notifications_enabled: true, language: Language::Ru }
  }
}

impl Preferences {
  /// Read preferences, falling back to defaults for anything absent,
  /// unrecognised or unreadable.
  ///
  /// Only the exact string `"true"` enables dark mode and only `"false"`
  /// disables notifications.
  pub fn load<K: KeyValueStore>(store: &K) -> Self {
    let read = |key: &str| match store.get(key) {
      Ok(v) => v,
      Err(e) => {
        warn!(key, error = %e, "preference unreadable; using default");
        None
      }
    };

    let language = read(LANGUAGE_KEY)
      .map(|raw| {
        raw.parse().unwrap_or_else(|_| {
          warn!(value = %raw, "unknown language preference; using default");
          Language::default()
        })
      })
      .unwrap_or_default();

    Self {
      dark_mode: read(DARK_MODE_KEY).as_deref() == Some("true"),
      notifications_enabled: read(NOTIFICATIONS_KEY).as_deref() != Some("false"),
      language,
    }
  }

  /// Write all three preferences.
  pub fn save<K: KeyValueStore>(&self, store: &K) -> Result<()> {
    let persist = |key: &str, value: &str| {
      store.set(key, value).map_err(|e| Error::Persist(Box::new(e)))
    };
    persist(DARK_MODE_KEY, bool_str(self.dark_mode))?;
    persist(NOTIFICATIONS_KEY, bool_str(self.notifications_enabled))?;
    persist(LANGUAGE_KEY, self.language.as_ref())
  }
}

fn bool_str(b: bool) -> &'static str { if b { "true" } else { "false" } }

#[cfg(test)]
mod tests {
  use super::*;
  use crate::kv::{MemoryStore, UnavailableStore};

  #[test]
  fn defaults_when_nothing_stored() {
    let prefs = Preferences::load(&MemoryStore::new());
    assert_eq!(prefs, Preferences::default());
    assert!(!prefs.dark_mode);
    assert!(prefs.notifications_enabled);
    assert_eq!(prefs.language, Language::Ru);
  }

  #[test]
  fn defaults_when_store_unavailable() {
    assert_eq!(Preferences::load(&UnavailableStore), Preferences::default());
  }

  #[test]
  fn save_and_load() {
    let kv = MemoryStore::new();
    let prefs = Preferences { dark_mode: true, notifications_enabled: false, language: Language::En };
    prefs.save(&kv).unwrap();

    assert_eq!(kv.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    assert_eq!(kv.get(NOTIFICATIONS_KEY).unwrap().as_deref(), Some("false"));
    assert_eq!(kv.get(LANGUAGE_KEY).unwrap().as_deref(), Some("en"));
    assert_eq!(Preferences::load(&kv), prefs);
  }

  #[test]
  fn odd_values_fall_back() {
    let kv = MemoryStore::new();
    kv.set(DARK_MODE_KEY, "yes").unwrap();
    kv.set(NOTIFICATIONS_KEY, "0").unwrap();
    kv.set(LANGUAGE_KEY, "de").unwrap();
    let prefs = Preferences::load(&kv);
    assert!(!prefs.dark_mode);
    assert!(prefs.notifications_enabled);
    assert_eq!(prefs.language, Language::Ru);
  }

  #[test]
  fn language_round_trips_through_strings() {
    assert_eq!("en".parse::<Language>().unwrap(), Language::En);
    assert_eq!(Language::Ru.to_string(), "ru");
  }

  #[test]
  fn day_names() {
    assert_eq!(Language::Ru.short_day(DayOfWeek::MONDAY), "Пн");
    assert_eq!(Language::En.full_day(DayOfWeek::SUNDAY), "Sunday");
    assert_eq!(Language::Ru.full_day(DayOfWeek::WEDNESDAY), "Среда");
  }

  #[test]
  fn locale_dates() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    assert_eq!(Language::Ru.format_date(date), "06.01.2025");
    assert_eq!(Language::En.format_date(date), "1/6/2025");
  }
}
