//! Provider routing.
//!
//! A pure function of configuration and the requested model name: a model
//! whose name starts with the DeepSeek prefix goes to DeepSeek, anything else
//! goes to the primary (OpenAI-compatible) vendor. There is no fallback
//! between vendors.

use std::fmt;

use loom_config::{LlmConfig, ProviderConfig};
use serde::Serialize;

/// Which configured vendor a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    OpenAi,
    DeepSeek,
}

impl Vendor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Config section holding this vendor's settings.
    #[must_use]
    pub const fn config_section(self) -> &'static str {
        match self {
            Self::OpenAi => "llm.openai",
            Self::DeepSeek => "llm.deepseek",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint and credentials resolved for one request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ProviderRoute {
    pub vendor: Vendor,
    pub model: String,
    pub base_url: String,
    #[serde(skip)]
    pub api_key: String,
}

impl ProviderRoute {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    /// Full URL of the chat-completions endpoint.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

// Keeps the key out of logs and panics.
impl fmt::Debug for ProviderRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRoute")
            .field("vendor", &self.vendor)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .finish()
    }
}

/// Routing table built once from configuration.
#[derive(Debug, Clone)]
pub struct ProviderRouter {
    default_model: String,
    openai: ProviderConfig,
    deepseek: ProviderConfig,
}

impl ProviderRouter {
    #[must_use]
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            default_model: config.default_model.clone(),
            openai: config.openai.clone(),
            deepseek: config.deepseek.clone(),
        }
    }

    #[must_use]
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Resolve the vendor for `requested`, or for the default model when `None`.
    #[must_use]
    pub fn route(&self, requested: Option<&str>) -> ProviderRoute {
        let model = requested
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.default_model.as_str());

        let prefix = self.deepseek.model_prefix.as_str();
        let (vendor, provider) = if !prefix.is_empty() && model.starts_with(prefix) {
            (Vendor::DeepSeek, &self.deepseek)
        } else {
            (Vendor::OpenAi, &self.openai)
        };

        tracing::debug!(%model, %vendor, base_url = %provider.base_url, "routed model");

        ProviderRoute {
            vendor,
            model: model.to_string(),
            base_url: provider.base_url.clone(),
            api_key: provider.api_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config() -> LlmConfig {
        let mut config = LlmConfig::default();
        config.openai.api_key = "sk-openai".into();
        config.deepseek.api_key = "sk-deepseek".into();
        config
    }

    #[rstest]
    #[case(None, Vendor::DeepSeek, "deepseek-coder-33b-instruct")]
    #[case(Some("deepseek-chat"), Vendor::DeepSeek, "deepseek-chat")]
    #[case(Some("gpt-4-turbo-preview"), Vendor::OpenAi, "gpt-4-turbo-preview")]
    #[case(Some("my-deepseek-finetune"), Vendor::OpenAi, "my-deepseek-finetune")]
    #[case(Some("  "), Vendor::DeepSeek, "deepseek-coder-33b-instruct")]
    fn routing_table(
        #[case] requested: Option<&str>,
        #[case] vendor: Vendor,
        #[case] model: &str,
    ) {
        let route = ProviderRouter::new(&config()).route(requested);
        assert_eq!(route.vendor, vendor);
        assert_eq!(route.model, model);
    }

    #[test]
    fn route_carries_vendor_credentials() {
        let router = ProviderRouter::new(&config());
        let route = router.route(Some("gpt-4o"));
        assert_eq!(route.api_key, "sk-openai");
        assert_eq!(route.completions_url(), "https://api.openai.com/v1/chat/completions");

        let route = router.route(None);
        assert_eq!(route.api_key, "sk-deepseek");
        assert_eq!(route.base_url, "https://api.deepseek.com/v1");
    }

    #[test]
    fn openai_default_model_routes_primary() {
        let mut config = config();
        config.default_model = "gpt-4o-mini".into();
        assert_eq!(ProviderRouter::new(&config).route(None).vendor, Vendor::OpenAi);
    }

    #[test]
    fn empty_prefix_disables_deepseek() {
        let mut config = config();
        config.deepseek.model_prefix.clear();
        let route = ProviderRouter::new(&config).route(Some("deepseek-chat"));
        assert_eq!(route.vendor, Vendor::OpenAi);
    }

    #[test]
    fn debug_redacts_key() {
        let route = ProviderRouter::new(&config()).route(None);
        let shown = format!("{route:?}");
        assert!(!shown.contains("sk-deepseek"));
        assert!(shown.contains("<redacted>"));
        assert!(route.is_configured());
        assert!(!ProviderRouter::new(&LlmConfig::default()).route(None).is_configured());
    }
}
