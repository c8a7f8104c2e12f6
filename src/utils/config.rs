use crate::models::types::BotConfig;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Loads `config.json` at startup, writing a default file on first run so the
/// operator has something to edit.
#[derive(Debug)]
pub struct ConfigManager {
    pub config: BotConfig,
    config_path: String,
}

impl ConfigManager {
    pub fn new(config_path: &str) -> Result<Self, ConfigError> {
        let mut manager = Self {
            config: BotConfig::default(),
            config_path: config_path.to_string(),
        };

        manager.load_config()?;
        Ok(manager)
    }

    pub fn load_config(&mut self) -> Result<(), ConfigError> {
        if Path::new(&self.config_path).exists() {
            let content = fs::read_to_string(&self.config_path)?;
            self.config = serde_json::from_str(&content)?;
        } else {
            self.save_config()?;
        }

        Ok(())
    }

    pub fn save_config(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_manager_writes_default_on_first_run() {
        let path = "test_config.json";
        let _ = std::fs::remove_file(path);

        let manager = ConfigManager::new(path).expect("Failed to create ConfigManager in test");
        assert!(!manager.config.command_prefix.is_empty());
        // Both embed decorations feed user-visible embeds and must default
        // to something printable.
        assert!(!manager.config.embed_prefix.is_empty());
        assert!(!manager.config.embed_bullet.is_empty());
        assert!(Path::new(path).exists());

        let _ = std::fs::remove_file(path);
    }
}
