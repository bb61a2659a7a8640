//! Application settings and paths.
//!
//! XDG-compliant directories for configuration and stored reports, plus the
//! optional settings file that supplies CLI defaults.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static PATHS: OnceLock<Paths> = OnceLock::new();

/// Application directory paths following the XDG Base Directory spec.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/sounder)
    pub config_dir: PathBuf,
    /// Data directory (~/.local/share/sounder)
    pub data_dir: PathBuf,
}

impl Paths {
    /// Get the global paths instance.
    pub fn get() -> &'static Paths {
        PATHS.get_or_init(|| Self::new().expect("failed to initialize application paths"))
    }

    fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("dev", "sounder", "sounder").ok_or(ConfigError::DirectoryNotFound)?;

        let paths = Self {
            config_dir: project.config_dir().to_path_buf(),
            data_dir: project.data_dir().to_path_buf(),
        };

        fs::create_dir_all(&paths.config_dir)?;
        fs::create_dir_all(&paths.data_dir)?;

        Ok(paths)
    }

    /// Paths rooted at an explicit directory; used by tests.
    pub fn at(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
        }
    }

    /// Path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Directory holding persisted scan reports.
    pub fn scans_dir(&self) -> PathBuf {
        self.data_dir.join("scans")
    }
}

/// User-adjustable defaults for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default port specification.
    pub default_ports: String,
    /// Default cap on probes in flight.
    pub default_concurrency: usize,
    /// Default per-probe timeout in milliseconds.
    pub default_timeout_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_ports: "1-1000".to_string(),
            default_concurrency: crate::session::DEFAULT_CONCURRENCY,
            default_timeout_ms: 1000,
        }
    }
}

impl AppSettings {
    /// Load settings from the standard location, falling back to defaults
    /// when the file is absent or unreadable.
    pub fn load_or_default() -> Self {
        Self::load_from(&Paths::get().settings_file())
    }

    fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persist settings as pretty-printed JSON.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).expect("settings always serialize");
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = AppSettings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.default_ports, "1-1000");
        assert_eq!(settings.default_timeout_ms, 1000);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("settings.json");

        let settings = AppSettings {
            default_ports: "22,80,443".to_string(),
            default_concurrency: 64,
            default_timeout_ms: 250,
        };
        settings.save_to(&file).unwrap();

        let loaded = AppSettings::load_from(&file);
        assert_eq!(loaded.default_ports, "22,80,443");
        assert_eq!(loaded.default_concurrency, 64);
    }

    #[test]
    fn explicit_root_paths() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::at(dir.path());
        assert!(paths.scans_dir().starts_with(dir.path()));
    }
}
