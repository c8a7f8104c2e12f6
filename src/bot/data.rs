use std::sync::Arc;
use tokio::sync::Mutex;

use crate::utils::config::ConfigManager;
use crate::utils::provider::SettingProvider;

#[derive(Clone)]
pub struct BotData {
    pub config: Arc<Mutex<ConfigManager>>,
    pub provider: SettingProvider,
    pub http: reqwest::Client,
}
