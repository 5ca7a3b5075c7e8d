use serde::{Deserialize, Serialize};
use tokio::fs;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;

use super::error::{AppError, AppResult};
use super::types::{LanguagePair, ResponseOrdering};

const DEFAULT_ENDPOINT: &str = "http://91.198.71.199:7012/translator";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub api: ApiSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Quiet period after the last edit before a request is issued
    pub debounce_ms: u64,
    pub ordering: ResponseOrdering,
    pub languages: LanguagePair,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 30,
            user_agent: "mansi-translator/session".to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            ordering: ResponseOrdering::default(),
            languages: LanguagePair::default(),
        }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "mansi-translator")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    /// Load settings from the platform config directory, falling back to defaults
    /// when no file has been written yet.
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::info!("[Settings] No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await
            .map_err(|e| AppError::Config(format!("Failed to read settings file: {}", e)))?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))?;

        settings.validate()?;
        log::debug!("[Settings] Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await
                .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await
            .map_err(|e| AppError::Config(format!("Failed to write settings file: {}", e)))
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(AppError::Config("api.endpoint must not be empty".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::Config("api.timeout_secs must be positive".to_string()));
        }
        if self.session.debounce_ms == 0 {
            return Err(AppError::Config("session.debounce_ms must be positive".to_string()));
        }
        let langs = &self.session.languages;
        if langs.russian.is_empty() || langs.mansi.is_empty() {
            return Err(AppError::Config("language codes must not be empty".to_string()));
        }
        if langs.russian == langs.mansi {
            return Err(AppError::Config("language codes must differ".to_string()));
        }
        Ok(())
    }
}
