//! Application settings stored in `app_settings.json`

use crate::error::{Error, Result};
use crate::models::AppSettings;
use crate::storage::StorageService;

pub const SETTINGS_FILENAME: &str = "app_settings.json";

#[derive(Clone)]
pub struct SettingsService {
    storage: StorageService,
}

impl SettingsService {
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    /// Stored settings, or defaults when the file is missing or malformed
    pub async fn load_settings(&self) -> AppSettings {
        match self.storage.read_json::<AppSettings>(SETTINGS_FILENAME).await {
            Ok(settings) if settings.max_backups_per_day >= 1 => settings,
            Ok(settings) => {
                log::warn!(
                    "Ignoring maxBackupsPerDay={}, using defaults",
                    settings.max_backups_per_day
                );
                AppSettings::default()
            }
            Err(e) if e.is_not_found() => AppSettings::default(),
            Err(e) => {
                log::warn!("Failed to read settings, using defaults: {}", e);
                AppSettings::default()
            }
        }
    }

    pub async fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        if settings.max_backups_per_day < 1 {
            return Err(Error::InvalidSettings(
                "maxBackupsPerDay must be a number >= 1".to_string(),
            ));
        }
        self.storage.write_json(SETTINGS_FILENAME, settings).await?;
        log::info!("Max backups per day set to {}", settings.max_backups_per_day);
        Ok(())
    }
}
