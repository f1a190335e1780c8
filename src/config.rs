use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};
use crate::paragraph::{generated::DEFAULT_SENTENCES, SourceKind};
use crate::runtime::TICK_INTERVAL_MS;
use crate::session::{
    SessionConfig, DEFAULT_BASE_DURATION_SECS, DEFAULT_WORD_BONUS_SECS, DEFAULT_WORD_PENALTY_SECS,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub base_duration_secs: u32,
    pub word_bonus_secs: u32,
    pub word_penalty_secs: u32,
    pub tick_interval_ms: u64,
    pub source: SourceKind,
    pub sentences: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_duration_secs: DEFAULT_BASE_DURATION_SECS,
            word_bonus_secs: DEFAULT_WORD_BONUS_SECS,
            word_penalty_secs: DEFAULT_WORD_PENALTY_SECS,
            tick_interval_ms: TICK_INTERVAL_MS,
            source: SourceKind::default(),
            sentences: DEFAULT_SENTENCES,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.base_duration_secs == 0 {
            return Err(Error::InvalidConfig(
                "base_duration_secs must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            base_duration_secs: self.base_duration_secs,
            word_bonus_secs: self.word_bonus_secs,
            word_penalty_secs: self.word_penalty_secs,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file, distinguishing "no file" (Ok(None)) from a broken one.
    pub fn try_load(&self) -> Result<Option<Config>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let cfg: Config = serde_json::from_slice(&bytes)?;
        cfg.validate()?;
        Ok(Some(cfg))
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Config::default(),
            Err(err) => {
                tracing::warn!(
                    target: "config",
                    path = %self.path.display(),
                    %err,
                    "ignoring config file, using defaults"
                );
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        cfg.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            base_duration_secs: 90,
            word_bonus_secs: 3,
            word_penalty_secs: 7,
            tick_interval_ms: 500,
            source: SourceKind::Generated,
            sentences: 5,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));

        assert_matches!(store.try_load(), Ok(None));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ this is not json").unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_matches!(store.try_load(), Err(Error::ConfigFormat(_)));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "base_duration_secs": 30, "source": "generated" }"#).unwrap();
        let store = FileConfigStore::with_path(&path);

        let cfg = store.load();
        assert_eq!(cfg.base_duration_secs, 30);
        assert_eq!(cfg.source, SourceKind::Generated);
        assert_eq!(cfg.word_bonus_secs, 5);
        assert_eq!(cfg.word_penalty_secs, 10);
        assert_eq!(cfg.tick_interval_ms, 1000);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cfg = Config {
            base_duration_secs: 0,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(Error::InvalidConfig(_)));

        let cfg = Config {
            tick_interval_ms: 0,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(Error::InvalidConfig(_)));

        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        assert!(store.save(&cfg).is_err());
    }

    #[test]
    fn session_config_mirrors_timing_fields() {
        let cfg = Config {
            base_duration_secs: 45,
            word_bonus_secs: 1,
            word_penalty_secs: 2,
            ..Config::default()
        };
        let session = cfg.session_config();
        assert_eq!(session.base_duration_secs, 45);
        assert_eq!(session.word_bonus_secs, 1);
        assert_eq!(session.word_penalty_secs, 2);
        assert_eq!(cfg.tick_interval(), Duration::from_millis(1000));
    }
}
