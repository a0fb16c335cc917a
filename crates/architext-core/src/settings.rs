use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::PersistenceError;

/// Resolve the data directory (~/.architext/).
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".architext")
}

/// Default location of the saved designs list.
pub fn designs_path() -> PathBuf {
    data_dir().join("designs.json")
}

fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    pub provider: String,
    pub api_key: String,
    pub model: String,
    /// Request timeout handed to the model client. Unset means the client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl AiSettings {
    /// Override fields from `ARCHITEXT_PROVIDER`, `ARCHITEXT_API_KEY` and `ARCHITEXT_MODEL`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let pick = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(provider) = pick("ARCHITEXT_PROVIDER") {
            self.provider = provider;
        }
        if let Some(key) = pick("ARCHITEXT_API_KEY") {
            self.api_key = key;
        }
        if let Some(model) = pick("ARCHITEXT_MODEL") {
            self.model = model;
        }
        self
    }
}

/// Settings file merged with environment overrides. Missing or unreadable
/// files yield defaults.
pub fn read_settings() -> AiSettings {
    read_stored_settings().with_env_overrides()
}

/// Settings file contents alone, without environment overrides.
pub fn read_stored_settings() -> AiSettings {
    let path = settings_path();
    if !path.exists() {
        return AiSettings::default();
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_else(|| {
            tracing::warn!(path = %path.display(), "ignoring unreadable settings file");
            AiSettings::default()
        })
}

pub fn write_settings(settings: &AiSettings) -> Result<(), PersistenceError> {
    fs::create_dir_all(data_dir())?;
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(settings_path(), json)?;
    Ok(())
}

pub fn ai_configured(settings: &AiSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: &str, key: &str, model: &str) -> AiSettings {
        AiSettings {
            provider: provider.to_string(),
            api_key: key.to_string(),
            model: model.to_string(),
            timeout_secs: None,
        }
    }

    #[test]
    fn ollama_needs_no_key() {
        assert!(ai_configured(&settings("ollama", "", "llama3")));
        assert!(!ai_configured(&settings("openai", "", "gpt-4o")));
        assert!(ai_configured(&settings("openai", "sk-1", "gpt-4o")));
        assert!(!ai_configured(&settings("", "sk-1", "gpt-4o")));
    }

    #[test]
    fn env_overrides_replace_non_blank_values() {
        let base = settings("openai", "sk-file", "gpt-4o");
        let merged = base.with_overrides(|key| match key {
            "ARCHITEXT_PROVIDER" => Some("anthropic".to_string()),
            "ARCHITEXT_MODEL" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(merged.provider, "anthropic");
        assert_eq!(merged.api_key, "sk-file");
        assert_eq!(merged.model, "gpt-4o");
    }

    #[test]
    fn settings_use_camel_case_keys() {
        let s: AiSettings =
            serde_json::from_str(r#"{"provider":"groq","apiKey":"k","model":"m","timeoutSecs":30}"#)
                .unwrap();
        assert_eq!(s.api_key, "k");
        assert_eq!(s.timeout_secs, Some(30));
    }
}
