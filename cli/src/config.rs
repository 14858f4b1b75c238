use crate::api::DEFAULT_MODEL_ID;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_CONFIG_PATH: &str = "VIRALSCRIPT_CONFIG_PATH";
const ENV_API_KEY: &str = "GEMINI_API_KEY";
const ENV_MODEL: &str = "VIRALSCRIPT_MODEL";
const ENV_BASE_URL: &str = "VIRALSCRIPT_BASE_URL";

#[derive(Debug, Clone)]
pub struct AppConfig {
    api_key: Option<String>,
    model_id: String,
    base_url: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file_override()? {
            if path.exists() {
                let partial = read_partial(&path)?;
                config.apply_partial(partial);
            }
        } else {
            let path = Self::default_config_path()?;
            if path.exists() {
                let partial = read_partial(&path)?;
                config.apply_partial(partial);
            }
        }

        config.apply_env();
        Ok(config)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "ViralScript", "ViralScript")
            .ok_or_else(|| anyhow!("unable to determine config directory"))?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    fn apply_partial(&mut self, partial: PartialConfig) {
        if let Some(key) = partial.api_key {
            self.api_key = Some(key);
        }
        if let Some(model_id) = partial.model_id {
            self.model_id = model_id;
        }
        if let Some(url) = partial.base_url {
            self.base_url = Some(url);
        }
    }

    fn apply_env(&mut self) {
        if let Ok(value) = env::var(ENV_API_KEY) {
            if value.trim().is_empty() {
                self.api_key = None;
            } else {
                self.api_key = Some(value);
            }
        }
        if let Ok(value) = env::var(ENV_MODEL) {
            if !value.trim().is_empty() {
                self.model_id = value;
            }
        }
        if let Ok(value) = env::var(ENV_BASE_URL) {
            if value.trim().is_empty() {
                self.base_url = None;
            } else {
                self.base_url = Some(value);
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { api_key: None, model_id: DEFAULT_MODEL_ID.into(), base_url: None }
    }
}

fn config_file_override() -> Result<Option<PathBuf>> {
    if let Some(value) = env::var_os(ENV_CONFIG_PATH) {
        if value.is_empty() {
            return Ok(None);
        }
        let path = PathBuf::from(value);
        if path.is_dir() {
            return Ok(Some(path.join(CONFIG_FILE_NAME)));
        }
        return Ok(Some(path));
    }
    Ok(None)
}

fn read_partial(path: &Path) -> Result<PartialConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let partial: PartialConfig =
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(partial)
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PartialConfig {
    api_key: Option<String>,
    model_id: Option<String>,
    base_url: Option<String>,
}
