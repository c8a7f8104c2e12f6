pub mod config;
pub mod logger;
pub mod provider;
pub mod time;
