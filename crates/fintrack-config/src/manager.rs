use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{ConfigError, Settings};

const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// Handles persistence for [`Settings`]: load on start, save on mutate.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
}

impl SettingsManager {
    pub fn new(settings_path: PathBuf) -> Self {
        Self { settings_path }
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(SETTINGS_FILE)))
    }

    /// Default settings directory under the user's config dir.
    pub fn default_base_dir() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("fintrack")
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Loads persisted settings, or defaults when nothing was saved yet.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if self.settings_path.exists() {
            let data = fs::read_to_string(&self.settings_path)?;
            serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
        } else {
            tracing::debug!(path = %self.settings_path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
    }

    /// Atomically replaces the settings file.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let tmp = tmp_path(&self.settings_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.settings_path)?;
        tracing::debug!(path = %self.settings_path.display(), "settings saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fintrack_domain::{ReminderSetting, TimeOfDay, Weekday};
    use tempfile::tempdir;

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let settings = manager.load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();

        let mut settings = Settings::default();
        settings.set_reminder(ReminderSetting::new(
            [Weekday::Saturday],
            TimeOfDay::new(10, 15).unwrap(),
        ));
        manager.save(&settings).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn save_overwrites_previous_state() {
        let dir = tempdir().unwrap();
        let manager = SettingsManager::with_base_dir(dir.path().to_path_buf()).unwrap();

        let mut settings = Settings::default();
        settings.set_reminder(ReminderSetting::new(
            [Weekday::Monday, Weekday::Friday],
            TimeOfDay::new(9, 0).unwrap(),
        ));
        manager.save(&settings).unwrap();

        settings.set_reminder(ReminderSetting::new([], TimeOfDay::new(9, 0).unwrap()));
        manager.save(&settings).unwrap();

        let loaded = manager.load().unwrap();
        assert!(loaded.reminder.unwrap().is_disabled());
    }
}
