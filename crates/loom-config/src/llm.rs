//! Generative-model provider configuration.
//!
//! Two vendors are configured: `openai` is the primary vendor and receives
//! every model name that no other vendor claims; `deepseek` receives model
//! names that start with its `model_prefix`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_model() -> String {
    String::from("deepseek-coder-33b-instruct")
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_tokens() -> u32 {
    2000
}

fn default_openai() -> ProviderConfig {
    ProviderConfig {
        api_key: String::new(),
        base_url: String::from("https://api.openai.com/v1"),
        model_prefix: String::new(),
    }
}

fn default_deepseek() -> ProviderConfig {
    ProviderConfig {
        api_key: String::new(),
        base_url: String::from("https://api.deepseek.com/v1"),
        model_prefix: String::from("deepseek"),
    }
}

/// Endpoint and credentials for one vendor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API, without trailing `/chat/completions`.
    #[serde(default)]
    pub base_url: String,

    /// Model names starting with this prefix route here. Empty on the primary vendor.
    #[serde(default)]
    pub model_prefix: String,
}

impl ProviderConfig {
    /// Check if the provider has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Model used when a request names none.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Per-call timeout for completion requests.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Primary vendor.
    #[serde(default = "default_openai")]
    pub openai: ProviderConfig,

    /// Prefix-routed vendor.
    #[serde(default = "default_deepseek")]
    pub deepseek: ProviderConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            request_timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            openai: default_openai(),
            deepseek: default_deepseek(),
        }
    }
}

impl LlmConfig {
    /// Reject values no provider would accept.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero timeout, a zero token
    /// budget, an empty default model, or a temperature outside `0.0..=2.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_model.trim().is_empty() {
            return Err(invalid("llm.default_model", "must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("llm.request_timeout_secs", "must be greater than zero"));
        }
        if self.max_tokens == 0 {
            return Err(invalid("llm.max_tokens", "must be greater than zero"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(invalid("llm.temperature", "must be within 0.0..=2.0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
