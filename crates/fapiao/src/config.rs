//! Interpreter configuration.
//!
//! The API key is threaded explicitly from here into the client instead of
//! living in shared mutable state; callers construct one config per run.

use std::time::Duration;

use secrecy::SecretString;

pub const DEFAULT_API_HOST: &str = "https://api.deepseek.com";
pub const DEFAULT_CHAT_MODEL: &str = "deepseek-chat";

const ENV_API_KEY: &str = "DEEPSEEK_API_KEY";
const ENV_API_HOST: &str = "DEEPSEEK_API_HOST";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential for the chat-completions API. Absent keys are not an
    /// error until the first external call is attempted.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
    /// Optional external deadline for a single LLM call. There is no in-band
    /// timeout by default; a hang stalls the batch unless this is set.
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_HOST.to_string(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            timeout: None,
        }
    }
}

impl LlmConfig {
    /// Reads `DEEPSEEK_API_KEY` and `DEEPSEEK_API_HOST` from the environment,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(SecretString::from);
        let base_url =
            std::env::var(ENV_API_HOST).unwrap_or_else(|_| DEFAULT_API_HOST.to_string());

        Self {
            api_key,
            base_url,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_with_key_and_host() {
        std::env::set_var(ENV_API_KEY, "sk-test-key");
        std::env::set_var(ENV_API_HOST, "https://proxy.example.com");

        let config = LlmConfig::from_env();
        assert_eq!(
            config.api_key.as_ref().unwrap().expose_secret(),
            "sk-test-key"
        );
        assert_eq!(config.base_url, "https://proxy.example.com");
        assert_eq!(config.model, DEFAULT_CHAT_MODEL);

        std::env::remove_var(ENV_API_KEY);
        std::env::remove_var(ENV_API_HOST);
    }

    #[test]
    #[serial]
    fn test_from_env_without_key() {
        std::env::remove_var(ENV_API_KEY);
        std::env::remove_var(ENV_API_HOST);

        let config = LlmConfig::from_env();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_API_HOST);
        assert!(config.timeout.is_none());
    }

    #[test]
    #[serial]
    fn test_blank_env_key_counts_as_absent() {
        std::env::set_var(ENV_API_KEY, "   ");
        let config = LlmConfig::from_env();
        assert!(config.api_key.is_none());
        std::env::remove_var(ENV_API_KEY);
    }

    #[test]
    fn test_builder_overrides() {
        let config = LlmConfig::default()
            .with_api_key("sk-abc")
            .with_base_url("https://other.example.com")
            .with_model("deepseek-reasoner")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.api_key.unwrap().expose_secret(), "sk-abc");
        assert_eq!(config.base_url, "https://other.example.com");
        assert_eq!(config.model, "deepseek-reasoner");
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    }
}
