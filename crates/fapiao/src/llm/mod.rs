pub mod deepseek;
pub mod prompt;

pub use deepseek::DeepSeekClient;
pub use prompt::SYSTEM_PROMPT;

use crate::error::LlmError;

/// External chat-completion capability. Given a system instruction and a user
/// payload, returns the model's response body (requested as a JSON object) or
/// fails; it performs no parsing of the returned string.
pub trait ChatCompletion: Send + Sync {
    fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError>;
}
