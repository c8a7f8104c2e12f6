use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Prefix for text-message command invocations; slash commands ignore it.
    pub command_prefix: String,
    pub embed_prefix: String,
    pub embed_bullet: String,
    #[serde(default)]
    pub tokens: ApiTokens,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: "!".to_string(),
            embed_prefix: "❯".to_string(),
            embed_bullet: "•".to_string(),
            tokens: ApiTokens::default(),
        }
    }
}

/// API keys for the web search proxy commands. Left unset, the commands
/// report themselves as not configured instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiTokens {
    #[serde(default)]
    pub wolfram: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
}

/// Per-guild event logging settings, stored under the guild scope in the
/// settings provider as the `mod_log` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModLogSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub channel_id: Option<u64>,
}
