// Engine settings, loaded from an optional JSON file. Missing keys take defaults.
use serde::{Deserialize, Serialize};
use shared::language::Language;
use shared::overstay::TolerancePolicy;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{EngineError, EngineResult};

pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Directory holding one JSON file per collection.
    pub data_dir: PathBuf,
    /// Where PDF and CSV reports are written.
    pub export_dir: PathBuf,
    pub language: Language,
    pub max_attachment_bytes: u64,
    /// Base cadence of the "now" refresh, in seconds.
    pub refresh_interval_secs: u64,
    pub tolerance: TolerancePolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_dir: PathBuf::from("data"),
            export_dir: PathBuf::from("."),
            language: Language::PtBr,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            refresh_interval_secs: 60,
            tolerance: TolerancePolicy::default(),
        }
    }
}

impl EngineSettings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> EngineResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let settings = Self::from_json_str(&raw)?;
                tracing::info!(path = %path.display(), "Loaded engine settings");
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_json_str(raw: &str) -> EngineResult<Self> {
        let settings: EngineSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.max_attachment_bytes == 0 {
            return Err(EngineError::ConfigError("max_attachment_bytes must be positive".to_string()));
        }
        if self.refresh_interval_secs == 0 {
            return Err(EngineError::ConfigError("refresh_interval_secs must be positive".to_string()));
        }
        let policy = &self.tolerance;
        if policy.short_light_ratio > policy.short_medium_ratio
            || policy.day_light > policy.day_medium
            || policy.long_light > policy.long_medium
        {
            return Err(EngineError::ConfigError(
                "tolerance thresholds must not decrease from light to medium".to_string(),
            ));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.max_attachment_bytes, 10 * 1024 * 1024);
        assert_eq!(settings.refresh_interval(), Duration::from_secs(60));
        assert_eq!(settings.language, Language::PtBr);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = EngineSettings::from_json_str(r#"{"language":"en","tolerance":{"day_light":30}}"#).unwrap();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.tolerance.day_light, 30);
        assert_eq!(settings.tolerance.day_medium, 180);
        assert_eq!(settings.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let settings = EngineSettings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, EngineSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"data_dir":"/var/lib/parking","refresh_interval_secs":30}}"#).unwrap();
        file.flush().unwrap();
        let settings = EngineSettings::load(file.path()).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/parking"));
        assert_eq!(settings.refresh_interval_secs, 30);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineSettings::from_json_str(r#"{"max_attachment_bytes":0}"#),
            Err(EngineError::ConfigError(_))
        ));
        assert!(matches!(
            EngineSettings::from_json_str(r#"{"tolerance":{"day_light":500}}"#),
            Err(EngineError::ConfigError(_))
        ));
        assert!(matches!(EngineSettings::from_json_str("not json"), Err(EngineError::ConfigError(_))));
    }
}
