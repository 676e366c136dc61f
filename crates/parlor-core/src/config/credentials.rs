use super::config::ParlorConfig;
use crate::providers::gemini::DEFAULT_BASE_URL;
use crate::providers::provider::LlmProvider;
use crate::providers::{GeminiProvider, OpenAiProvider};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Provider selection saved by `parlor setup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub provider: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl Credentials {
    pub fn path() -> PathBuf {
        ParlorConfig::resolve_path("credentials.json")
    }

    pub fn load() -> Result<Option<Self>> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path)?;
        let creds: Credentials = serde_json::from_str(&data)?;
        Ok(Some(creds))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Provider settings straight from the loaded config.
    pub fn from_config(config: &ParlorConfig) -> Self {
        Self {
            provider: config.provider.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    /// Saved credentials if present, else the config's. A saved file with a
    /// blank key borrows the config's key.
    pub fn resolve(saved: Option<Self>, config: &ParlorConfig) -> Self {
        match saved {
            Some(mut creds) => {
                if creds.api_key.trim().is_empty() {
                    creds.api_key = config.api_key.clone();
                }
                creds
            }
            None => Self::from_config(config),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.provider == "ollama" || !self.api_key.trim().is_empty()
    }

    pub fn build_provider(&self) -> Arc<dyn LlmProvider> {
        match self.provider.as_str() {
            "openai" => Arc::new(OpenAiProvider::new(
                &self.base_url,
                &self.api_key,
                &self.model,
            )),
            "ollama" => Arc::new(
                OpenAiProvider::new(&self.base_url, &self.api_key, &self.model).keyless(),
            ),
            _ => {
                let base = if self.base_url.is_empty() {
                    DEFAULT_BASE_URL
                } else {
                    &self.base_url
                };
                Arc::new(GeminiProvider::with_base_url(base, &self.api_key, &self.model))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini(key: &str) -> Credentials {
        Credentials {
            provider: "gemini".into(),
            api_key: key.into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: "gemini-2.0-flash".into(),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");
        assert!(Credentials::load_from(&path).unwrap().is_none());

        gemini("AIza-123").save_to(&path).unwrap();
        assert_eq!(Credentials::load_from(&path).unwrap(), Some(gemini("AIza-123")));
    }

    #[test]
    fn saved_credentials_take_precedence() {
        let config = ParlorConfig {
            api_key: "cfg-key".into(),
            model: "gemini-1.5-pro".into(),
            ..ParlorConfig::default()
        };
        let creds = Credentials::resolve(Some(gemini("saved-key")), &config);
        assert_eq!(creds.api_key, "saved-key");
        assert_eq!(creds.model, "gemini-2.0-flash");

        let creds = Credentials::resolve(Some(gemini("")), &config);
        assert_eq!(creds.api_key, "cfg-key");

        let creds = Credentials::resolve(None, &config);
        assert_eq!(creds.model, "gemini-1.5-pro");
    }

    #[test]
    fn provider_reflects_key_presence() {
        assert!(!gemini("").build_provider().is_configured());
        let p = gemini("AIza-123").build_provider();
        assert!(p.is_configured());
        assert_eq!(p.name(), "gemini");
    }

    #[test]
    fn ollama_needs_no_key() {
        let creds = Credentials {
            provider: "ollama".into(),
            api_key: String::new(),
            base_url: "http://localhost:11434/v1".into(),
            model: "llama3.2".into(),
        };
        assert!(creds.is_configured());
        let p = creds.build_provider();
        assert!(p.is_configured());
        assert_eq!(p.name(), "openai");
    }
}
