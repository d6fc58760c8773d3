use crate::error::{Result, TaptalkError};
use crate::insight::openai::{DEFAULT_API_BASE, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for taptalk, stored in `config.json` inside the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaptalkConfig {
    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat-completions API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key; `OPENAI_API_KEY` takes precedence when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for TaptalkConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key: None,
        }
    }
}

impl TaptalkConfig {
    /// Keys accepted by [`TaptalkConfig::get`] and [`TaptalkConfig::set`].
    pub const KEYS: [&'static str; 3] = ["model", "api_base", "api_key"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TaptalkError::Io)?;
        let config: TaptalkConfig =
            serde_json::from_str(&content).map_err(TaptalkError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TaptalkError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TaptalkError::Serialization)?;
        fs::write(&config_path, content).map_err(TaptalkError::Io)?;

        // The file may hold the API key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&config_path, fs::Permissions::from_mode(0o600))
                .map_err(TaptalkError::Io)?;
        }
        Ok(())
    }

    /// The key from the environment if set, otherwise from the file.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "model" => Ok(Some(self.model.clone())),
            "api_base" => Ok(Some(self.api_base.clone())),
            "api_key" => Ok(self.api_key.as_deref().map(mask_secret)),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "model" => self.model = non_empty(key, value)?,
            "api_base" => self.api_base = non_empty(key, value)?,
            "api_key" => {
                self.api_key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(TaptalkError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn unknown_key(key: &str) -> TaptalkError {
    TaptalkError::Config(format!(
        "Unknown config key '{}'. Valid keys: {}",
        key,
        TaptalkConfig::KEYS.join(", ")
    ))
}

fn mask_secret(secret: &str) -> String {
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TaptalkConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.api_base, "https://api.openai.com/v1");
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = TaptalkConfig::load(dir.path()).unwrap();
        assert_eq!(config, TaptalkConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("data");

        let mut config = TaptalkConfig::default();
        config.set("model", "gpt-4o-mini").unwrap();
        config.set("api_key", "sk-test-1234").unwrap();
        config.save(&target).unwrap();

        let loaded = TaptalkConfig::load(&target).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"model":"local-llm"}"#).unwrap();

        let loaded = TaptalkConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.model, "local-llm");
        assert_eq!(loaded.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_get_masks_api_key() {
        let mut config = TaptalkConfig::default();
        config.set("api_key", "sk-abcdef9876").unwrap();
        assert_eq!(config.get("api_key").unwrap().as_deref(), Some("****9876"));
        config.set("api_key", "").unwrap();
        assert_eq!(config.get("api_key").unwrap(), None);
    }

    #[test]
    fn test_env_key_wins_over_file_key() {
        let mut config = TaptalkConfig::default();
        config.set("api_key", "sk-file").unwrap();

        assert_eq!(
            config.api_key_with_env(Some("sk-env".to_string())).as_deref(),
            Some("sk-env")
        );
        assert_eq!(
            config.api_key_with_env(Some("  ".to_string())).as_deref(),
            Some("sk-file")
        );
        assert_eq!(config.api_key_with_env(None).as_deref(), Some("sk-file"));
        assert_eq!(TaptalkConfig::default().api_key_with_env(None), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut config = TaptalkConfig::default();
        config.set("api_key", "sk-secret").unwrap();
        config.save(dir.path()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_set_rejects_unknown_and_empty() {
        let mut config = TaptalkConfig::default();
        assert!(matches!(
            config.set("colour", "pink"),
            Err(TaptalkError::Config(_))
        ));
        assert!(config.set("model", "  ").is_err());
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
