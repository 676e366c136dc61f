use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generator::DEFAULT_MAX_OUTPUT_TOKENS;
use crate::providers::gemini::DEFAULT_BASE_URL;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Application settings.
///
/// Read from `~/.parlor/config.json`, then a `.parlor.json` in the working
/// directory is merged over it key by key, then environment variables win:
///
/// ```json
/// {
///   "model": "gemini-2.0-flash",
///   "max_output_tokens": 200,
///   "personalities_dir": "/home/me/.parlor/personalities"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlorConfig {
    /// `"gemini"` (default), `"openai"` or `"ollama"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Reply length ceiling sent with every request.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Directory scanned for custom personality `.md` files.
    #[serde(default = "default_personalities_dir")]
    pub personalities_dir: PathBuf,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_personalities_dir() -> PathBuf {
    ParlorConfig::resolve_path("personalities")
}

fn default_log_path() -> PathBuf {
    ParlorConfig::resolve_path("parlor.log")
}

impl Default for ParlorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: default_base_url(),
            api_key: String::new(),
            max_output_tokens: default_max_output_tokens(),
            personalities_dir: default_personalities_dir(),
            log_path: default_log_path(),
        }
    }
}

impl ParlorConfig {
    pub fn load() -> Result<Self> {
        let local = std::env::current_dir()
            .ok()
            .map(|d| d.join(".parlor.json"))
            .filter(|p| p.exists());
        let mut config = Self::load_from(&Self::resolve_path("config.json"), local.as_deref())?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read `global` (if it exists) and merge `local` over it.
    pub fn load_from(global: &Path, local: Option<&Path>) -> Result<Self> {
        let mut config = if global.exists() {
            let data = std::fs::read_to_string(global)?;
            serde_json::from_str::<ParlorConfig>(&data)?
        } else {
            ParlorConfig::default()
        };

        if let Some(local) = local {
            let data = std::fs::read_to_string(local)?;
            let override_val: serde_json::Value = serde_json::from_str(&data)?;
            let mut base = serde_json::to_value(&config)?;
            if let (Some(base_obj), Some(over_obj)) =
                (base.as_object_mut(), override_val.as_object())
            {
                for (k, v) in over_obj {
                    base_obj.insert(k.clone(), v.clone());
                }
            }
            config = serde_json::from_value(base)?;
        }

        Ok(config)
    }

    /// Apply `PARLOR_*` overrides. The key falls back to `GEMINI_API_KEY`
    /// only when neither the files nor `PARLOR_API_KEY` set one.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = set("PARLOR_PROVIDER") {
            self.provider = v;
        }
        if let Some(v) = set("PARLOR_MODEL") {
            self.model = v;
        }
        if let Some(v) = set("PARLOR_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = set("PARLOR_API_KEY") {
            self.api_key = v;
        } else if self.api_key.is_empty() {
            if let Some(v) = set("GEMINI_API_KEY") {
                self.api_key = v;
            }
        }
        if let Some(n) = set("PARLOR_MAX_OUTPUT_TOKENS").and_then(|v| v.trim().parse().ok()) {
            self.max_output_tokens = n;
        }
    }

    pub fn resolve_path(relative: &str) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".parlor")
            .join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_target_gemini() {
        let cfg = ParlorConfig::default();
        assert_eq!(cfg.provider, "gemini");
        assert_eq!(cfg.model, "gemini-2.0-flash");
        assert_eq!(cfg.base_url, "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(cfg.max_output_tokens, 200);
        assert!(cfg.api_key.is_empty());
        assert!(cfg.personalities_dir.ends_with(".parlor/personalities"));
    }

    #[test]
    fn missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ParlorConfig::load_from(&dir.path().join("nope.json"), None).unwrap();
        assert_eq!(cfg.model, DEFAULT_MODEL);
    }

    #[test]
    fn local_file_overrides_global_key_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("config.json");
        let local = dir.path().join(".parlor.json");
        std::fs::write(&global, r#"{ "model": "gemini-1.5-pro", "api_key": "global" }"#).unwrap();
        std::fs::write(&local, r#"{ "max_output_tokens": 64 }"#).unwrap();

        let cfg = ParlorConfig::load_from(&global, Some(&local)).unwrap();
        assert_eq!(cfg.model, "gemini-1.5-pro");
        assert_eq!(cfg.api_key, "global");
        assert_eq!(cfg.max_output_tokens, 64);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("config.json");
        std::fs::write(&global, "{ not json").unwrap();
        assert!(ParlorConfig::load_from(&global, None).is_err());
    }

    #[test]
    fn env_overrides_files() {
        let mut cfg = ParlorConfig {
            api_key: "from-file".into(),
            ..ParlorConfig::default()
        };
        cfg.apply_env(env(&[
            ("PARLOR_MODEL", "gemini-1.5-flash"),
            ("PARLOR_API_KEY", "from-env"),
            ("PARLOR_MAX_OUTPUT_TOKENS", "120"),
        ]));
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert_eq!(cfg.api_key, "from-env");
        assert_eq!(cfg.max_output_tokens, 120);
    }

    #[test]
    fn gemini_key_is_only_a_fallback() {
        let mut cfg = ParlorConfig::default();
        cfg.apply_env(env(&[("GEMINI_API_KEY", "g-key")]));
        assert_eq!(cfg.api_key, "g-key");

        let mut cfg = ParlorConfig {
            api_key: "file-key".into(),
            ..ParlorConfig::default()
        };
        cfg.apply_env(env(&[("GEMINI_API_KEY", "g-key")]));
        assert_eq!(cfg.api_key, "file-key");
    }

    #[test]
    fn blank_or_bad_env_values_are_ignored() {
        let mut cfg = ParlorConfig::default();
        cfg.apply_env(env(&[("PARLOR_MODEL", "  "), ("PARLOR_MAX_OUTPUT_TOKENS", "lots")]));
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.max_output_tokens, 200);
    }
}
