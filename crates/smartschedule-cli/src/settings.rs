//! Layered runtime settings: defaults, then an optional TOML file, then
//! `SMARTSCHEDULE_*` environment variables. CLI flags are applied by the
//! caller on top.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

const DEFAULT_STORE_PATH: &str = "~/.local/share/smartschedule/schedule.db";
const DEFAULT_CONFIG_PATH: &str = "~/.config/smartschedule/config.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file holding the schedule and preferences.
  pub store_path: PathBuf,
}

impl Settings {
  /// Load settings. An explicitly named file must exist; the default file
  /// is optional.
  pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
    let (path, required) = match config_file {
      Some(p) => (p.to_path_buf(), true),
      None => (expand_tilde(Path::new(DEFAULT_CONFIG_PATH)), false),
    };

    let settings: Settings = config::Config::builder()
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .add_source(config::File::from(path.as_path()).required(required))
      .add_source(config::Environment::with_prefix("SMARTSCHEDULE"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")?;

    Ok(Self { store_path: expand_tilde(&settings.store_path) })
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
