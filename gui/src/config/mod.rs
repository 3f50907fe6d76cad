// GUI configuration: window, theme and the engine section, from assets/config/default.json.
pub mod theme;

use engine::EngineSettings;
use serde::Deserialize;
use shared::language::Language;
use std::path::Path;

use theme::ThemePalette;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub version: String,
    pub app: AppSettings,
    #[serde(default)]
    pub theme: ThemePalette,
    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppSettings {
    pub title: String,
    pub language: Language,
    pub window_width: u32,
    pub window_height: u32,
}

impl AppConfig {
    pub fn load_default() -> Result<Self, anyhow::Error> {
        let config_str = include_str!("../../assets/config/default.json");
        let config: AppConfig = serde_json::from_str(config_str)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Embedded defaults with the engine section replaced by `path` when that file exists.
    /// On-screen labels follow `app.language`; the engine language applies to exports.
    pub fn load_with_engine_file(path: &Path) -> Result<Self, anyhow::Error> {
        let mut config = Self::load_default()?;
        if path.exists() {
            config.engine = EngineSettings::load(path)?;
        }
        Ok(config)
    }
}
