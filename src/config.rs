use std::env;
use std::fs;
use std::path::Path;

use colloquy_core::DEFAULT_IMPORTANCE;
use serde::{Deserialize, Serialize};

use crate::error::{ColloquyError, Result};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that can use tools to answer questions.
When using tools, follow this format:

Using tool: [tool_name]
Parameters: [parameters as JSON]

After using a tool, incorporate the results into your response.
Be helpful, accurate, and concise.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    #[serde(default = "default_agent_name")]
    pub name: String,
    #[serde(default = "default_agent_description")]
    pub description: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    #[serde(default = "default_importance")]
    pub default_importance: i64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            description: default_agent_description(),
            system_prompt: default_system_prompt(),
            default_importance: default_importance(),
        }
    }
}

fn default_agent_name() -> String {
    "ToolUsingAssistant".into()
}

fn default_agent_description() -> String {
    "An assistant that can use various tools to answer questions".into()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.into()
}

fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: default_base_url(),
            organization: None,
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

impl ModelConfig {
    /// Returns the credential for providers that need one.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ColloquyError::Configuration(
                "OpenAI API key must be provided in the config file or set as OPENAI_API_KEY"
                    .into(),
            )),
        }
    }

    pub fn needs_api_key(&self) -> bool {
        self.provider != "stub"
    }
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            ColloquyError::Configuration(format!("cannot read {}: {err}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|err| {
            ColloquyError::Configuration(format!("failed to parse configuration: {err}"))
        })
    }

    pub fn from_env_or_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut cfg = Self::from_file(path)?;
        cfg.apply_env();
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    fn apply_env(&mut self) {
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            self.model.api_key = Some(key);
        }
        if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
            self.model.base_url = base_url;
        }
        if let Ok(model) = env::var("OPENAI_MODEL") {
            self.model.model = model;
        }
        if let Ok(org) = env::var("OPENAI_ORG") {
            self.model.organization = Some(org);
        }
        if let Ok(provider) = env::var("COLLOQUY_PROVIDER") {
            self.model.provider = provider.to_ascii_lowercase();
        }
        if let Ok(name) = env::var("COLLOQUY_AGENT_NAME") {
            self.agent.name = name;
        }
        if let Ok(level) = env::var("COLLOQUY_LOG") {
            self.logging.level = level;
        }
        if let Ok(json) = env::var("COLLOQUY_LOG_JSON") {
            if let Ok(parsed) = json.parse::<bool>() {
                self.logging.json = parsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_and_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[agent]\nname='Helper'\n[model]\nprovider='stub'\nmodel='scripted'\n[logging]\nlevel='debug'"
        )
        .unwrap();

        env::set_var("COLLOQUY_AGENT_NAME", "Overridden");
        let cfg = AppConfig::from_env_or_file(file.path()).unwrap();
        env::remove_var("COLLOQUY_AGENT_NAME");

        assert_eq!(cfg.agent.name, "Overridden");
        assert_eq!(cfg.model.model, "scripted");
        assert_eq!(cfg.model.base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.agent.default_importance, 5);
        assert!(cfg.agent.system_prompt.contains("Using tool: [tool_name]"));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        let cfg = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn reports_parse_errors_as_configuration() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[model\nprovider=").unwrap();
        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ColloquyError::Configuration(_)));
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        let mut model = ModelConfig::default();
        assert!(matches!(
            model.require_api_key(),
            Err(ColloquyError::Configuration(_))
        ));

        model.api_key = Some("sk-test".into());
        assert_eq!(model.require_api_key().unwrap(), "sk-test");
        assert!(model.needs_api_key());
    }
}
