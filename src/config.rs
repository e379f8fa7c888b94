//! Project configuration (`webapitest.json`).

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_COOKIE_KEY, DEFAULT_COOKIE_STORE, DEFAULT_SHELL_DIR};
use crate::error::{Result, WebApiTestError};
use crate::json_file::read_json_file;
use crate::scene::EnvironParam;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scripts behind the `cleandb`, `initdb` and `startwebserver` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellScripts {
    pub clean_db: PathBuf,
    pub init_db: PathBuf,
    pub start_webserver: PathBuf,
}

impl Default for ShellScripts {
    fn default() -> Self {
        let shell_dir = Path::new(DEFAULT_SHELL_DIR);
        ShellScripts {
            clean_db: shell_dir.join("clean_db.sh"),
            init_db: shell_dir.join("init_db.sh"),
            start_webserver: shell_dir.join("start_webserver.sh"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Scene directory
    pub path: PathBuf,
    /// Values for `{{key}}` placeholders
    pub env: IndexMap<String, String>,
    /// Name of the cookie carrying the login session
    pub cookie_key: String,
    /// Scene whose cases log in one user each, named after the case
    pub login_scene: Option<PathBuf>,
    /// Relative paths are resolved inside the scene directory
    pub cookie_store: PathBuf,
    /// Relative paths are resolved inside the project root
    pub shell: ShellScripts,
    /// Directory of the loaded config file
    #[serde(skip)]
    pub root: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            path: PathBuf::from("."),
            env: IndexMap::new(),
            cookie_key: DEFAULT_COOKIE_KEY.to_string(),
            login_scene: None,
            cookie_store: PathBuf::from(DEFAULT_COOKIE_STORE),
            shell: ShellScripts::default(),
            root: PathBuf::from("."),
        }
    }
}

impl ProjectConfig {
    /// Resolve the configuration: the explicit file, then `./webapitest.json`,
    /// then the user config directory, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(file_path) = explicit {
            if !file_path.is_file() {
                return Err(WebApiTestError::Config(format!(
                    "config file '{}' does not exist",
                    file_path.display()
                )));
            }
            return Self::load_from_file(file_path);
        }

        let candidates = [
            Some(PathBuf::from(DEFAULT_CONFIG_FILE)),
            dirs::config_dir().map(|dir| dir.join("webapitest").join("config.json")),
        ];

        for file_path in candidates.into_iter().flatten() {
            if file_path.is_file() {
                return Self::load_from_file(&file_path);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        let file_path = file_path.as_ref();
        log::info!("Loading config from {file_path:?}");

        let mut config: ProjectConfig = read_json_file(file_path)?;
        config.root = match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(config)
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    pub fn envs(&self) -> Vec<EnvironParam> {
        self.env
            .iter()
            .map(|(key, value)| EnvironParam::new(key, value))
            .collect()
    }

    pub fn cookie_store_path(&self) -> PathBuf {
        if self.cookie_store.is_absolute() {
            self.cookie_store.clone()
        } else {
            self.path.join(&self.cookie_store)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("webapitest.json");
        fs::write(&file_path, r#"{"path": "cases", "env": {"host": "localhost:5000"}}"#).unwrap();

        let config = ProjectConfig::load(Some(file_path.as_path())).unwrap();
        assert_eq!(config.path, PathBuf::from("cases"));
        assert_eq!(config.cookie_key, "session");
        assert_eq!(config.shell.init_db, PathBuf::from("shell/init_db.sh"));
        assert_eq!(config.envs(), vec![EnvironParam::new("host", "localhost:5000")]);
        assert_eq!(config.cookie_store_path(), PathBuf::from("cases/.cookies.json"));
        assert_eq!(config.root, dir.path());
    }

    #[test]
    fn test_default_root_is_working_directory() {
        assert_eq!(ProjectConfig::default().root, PathBuf::from("."));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = ProjectConfig::load(Some(Path::new("/nonexistent/webapitest.json")));
        assert!(matches!(result, Err(WebApiTestError::Config(_))));
    }

    #[test]
    fn test_with_path_overrides_scene_directory() {
        let config = ProjectConfig::default().with_path("/tmp/cases");
        assert_eq!(config.cookie_store_path(), PathBuf::from("/tmp/cases/.cookies.json"));
    }
}
