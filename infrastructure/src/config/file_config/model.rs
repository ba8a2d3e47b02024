//! Model backend configuration from TOML (`[model]` section)

use serde::{Deserialize, Serialize};

/// Raw model backend configuration
///
/// The backend is any server speaking the OpenAI chat-completions protocol
/// (OpenAI itself, Ollama, vLLM, LiteLLM, ...). When `enabled` is false the
/// specialists use their rule-based analysis only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub enabled: bool,
    /// Base URL up to and including the API version, e.g. `http://localhost:11434/v1`
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    pub temperature: f32,
    /// HTTP request timeout
    pub request_timeout_seconds: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llama3.1".to_string(),
            api_key_env: None,
            temperature: 0.2,
            request_timeout_seconds: 60,
        }
    }
}

impl FileModelConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileModelConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.request_timeout_seconds, 60);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_deserialize() {
        let toml_str = r#"
[model]
enabled = true
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
api_key_env = "OPENAI_API_KEY"
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.model.enabled);
        assert_eq!(config.model.model, "gpt-4o-mini");
        assert_eq!(config.model.api_key_env.as_deref(), Some("OPENAI_API_KEY"));
        // Unspecified fields keep their defaults
        assert_eq!(config.model.temperature, 0.2);
    }
}
