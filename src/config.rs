use crate::predictor::DEFAULT_MAX_SUGGESTIONS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "keyboard-predict";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models_dir: Option<PathBuf>,
    pub max_suggestions: usize,
    pub show_tier: bool,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models_dir: None,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            show_tier: false,
            log_filter: "keyboard_predict=info".to_string(),
        }
    }
}

impl Config {
    /// Load the per-user config, creating it with defaults on first run.
    ///
    /// Errors go back to the caller, which logs them once tracing is up.
    pub fn load() -> Result<Self, confy::ConfyError> {
        let path = confy::get_configuration_file_path(APP_NAME, Some(CONFIG_NAME))?;
        Self::load_path(&path)
    }

    pub fn load_path(path: &Path) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, Some(CONFIG_NAME), self)
    }

    /// Model directory: explicit setting, then the per-user data dir, then
    /// `./models`.
    pub fn resolve_models_dir(&self) -> PathBuf {
        if let Some(dir) = &self.models_dir {
            return dir.clone();
        }

        dirs::data_dir()
            .map(|base| base.join(APP_NAME).join("models"))
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| PathBuf::from("models"))
    }
}
