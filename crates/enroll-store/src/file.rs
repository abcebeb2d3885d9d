// ABOUTME: File-backed store for EnrollConfig: load, atomic save, and first-run initialisation.
// ABOUTME: Saves go through a temp file + fsync + rename so a failed write never truncates the config.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use enroll_core::EnrollConfig;
use thiserror::Error;

/// Errors that can occur while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("configuration file {0} does not exist")]
    Missing(PathBuf),

    #[error("configuration file {0} already exists")]
    AlreadyExists(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The configuration file on disk. Always re-read; nothing is cached.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the configuration file. Sections absent from the file take defaults.
    pub fn load(&self) -> Result<EnrollConfig, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::Missing(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let cfg: EnrollConfig = serde_json::from_str(&contents)?;
        Ok(cfg)
    }

    /// Write the configuration atomically (write to .tmp, fsync, rename).
    /// Creates the parent directory if it does not exist.
    pub fn save(&self, cfg: &EnrollConfig) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut json = serde_json::to_string_pretty(cfg)?;
        json.push('\n');

        let tmp_path = self.tmp_path();
        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = %self.path.display(), "configuration written");
        Ok(())
    }

    /// Write a default configuration. Refuses to replace an existing file unless `force` is set.
    pub fn init(&self, force: bool) -> Result<EnrollConfig, StoreError> {
        if !force && self.path.exists() {
            return Err(StoreError::AlreadyExists(self.path.clone()));
        }
        let cfg = EnrollConfig::default();
        self.save(&cfg)?;
        Ok(cfg)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "config.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroll_core::Toggle;
    use tempfile::TempDir;

    fn sample() -> EnrollConfig {
        let mut cfg = EnrollConfig::default();
        cfg.newjw_login.enabled = Toggle::On;
        cfg.newjw_login.username = "2024000001".into();
        cfg.newjw_login.password = "pw".into();
        cfg.course.set("Z-LAST-ALPHABETICALLY", "1");
        cfg.course.set("A-FIRST-ALPHABETICALLY", "0");
        cfg
    }

    #[test]
    fn save_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        store.save(&sample()).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, sample());
        assert_eq!(
            loaded.course.keys().collect::<Vec<_>>(),
            vec!["Z-LAST-ALPHABETICALLY", "A-FIRST-ALPHABETICALLY"]
        );
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("absent.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Missing(_)));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ConfigStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn load_tolerates_unrecognized_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "bark": {"enabled": "true", "url": ""},
                "web": {"host": "127.0.0.1", "port": 7777,
                        "auth": {"enabled": "1", "username": "u", "password": "p"}}
            }"#,
        )
        .unwrap();

        let cfg = ConfigStore::new(&path).load().unwrap();

        assert_eq!(cfg.bark.enabled, Toggle::Unrecognized("true".into()));
        assert_eq!(cfg.web.port, 7777);
        assert!(cfg.web.auth.is_enabled());
    }

    #[test]
    fn save_creates_parent_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let store = ConfigStore::new(&path);

        store.save(&sample()).unwrap();

        assert!(path.exists());
        assert!(!path.with_file_name("config.json.tmp").exists());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));
        store.save(&sample()).unwrap();

        assert!(matches!(store.init(false), Err(StoreError::AlreadyExists(_))));
        assert_eq!(store.load().unwrap(), sample());

        store.init(true).unwrap();
        assert_eq!(store.load().unwrap(), EnrollConfig::default());
    }
}
