//! Configuration management for the FitTrack client
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FT__)

use anyhow::Result;
use fittrack_shared::models::{DEFAULT_CALORIE_GOAL, DEFAULT_STEP_GOAL, DEFAULT_WATER_GOAL_ML};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub chat: ChatConfig,
    #[serde(default)]
    pub goals: GoalConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory the file-backed store keeps its blobs in
    pub data_dir: PathBuf,
}

/// Support-chat configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// The well-known identity on the admin side of every conversation
    pub admin_id: String,
    pub admin_username: String,
    pub admin_password: String,
}

/// Default daily goals applied to fresh fitness state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    pub calories: u32,
    pub steps: u32,
    pub water_ml: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIE_GOAL,
            steps: DEFAULT_STEP_GOAL,
            water_ml: DEFAULT_WATER_GOAL_ML,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from(".fittrack"),
            },
            chat: ChatConfig {
                admin_id: "admin123".to_string(),
                admin_username: "admin".to_string(),
                admin_password: "password".to_string(),
            },
            goals: GoalConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (FT__ prefix)
            // e.g., FT__CHAT__ADMIN_ID=support sets chat.admin_id
            .add_source(config::Environment::with_prefix("FT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
