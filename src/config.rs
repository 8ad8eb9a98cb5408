use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level vault configuration
#[derive(Debug, Deserialize, Clone)]
pub struct VaultConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Directory generated images are written under
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    /// API key for the image-generation service. When absent, image
    /// generation is skipped entirely - no remote call is attempted.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Image-generation request parameters
    #[serde(default)]
    pub image: ImageGenConfig,
    /// Retry behavior for transient image-generation failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            image_dir: default_image_dir(),
            api_key: None,
            image: ImageGenConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Parameters for the image-generation endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct ImageGenConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Requested image dimensions
    #[serde(default = "default_size")]
    pub size: String,
    /// Rendering quality tier
    #[serde(default = "default_quality")]
    pub quality: String,
    /// Base URL for the API endpoint (for custom or proxy endpoints)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            size: default_size(),
            quality: default_quality(),
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

/// Retry behavior for background jobs
#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    /// Number of attempts per job before giving up
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    /// Initial delay between attempts in milliseconds (grows linearly with
    /// the attempt number)
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

// Default value functions
fn default_database_path() -> PathBuf {
    PathBuf::from("recipe_vault.db")
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("generated_images")
}

fn default_model() -> String {
    "gpt-image-1".to_string()
}

fn default_size() -> String {
    "1024x1024".to_string()
}

fn default_quality() -> String {
    "low".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl VaultConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPEVAULT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPEVAULT__API_KEY,
    /// RECIPEVAULT__IMAGE__MODEL, ...
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPEVAULT__IMAGE__MODEL
            .add_source(
                Environment::with_prefix("RECIPEVAULT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_model(), "gpt-image-1");
        assert_eq!(default_size(), "1024x1024");
        assert_eq!(default_quality(), "low");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_retry_attempts(), 3);
        assert_eq!(default_retry_delay_ms(), 1000);
    }

    #[test]
    fn test_config_defaults() {
        let config = VaultConfig::default();
        assert_eq!(config.database_path, PathBuf::from("recipe_vault.db"));
        assert_eq!(config.image_dir, PathBuf::from("generated_images"));
        assert!(config.api_key.is_none());
        assert_eq!(config.image.base_url, "https://api.openai.com");
        assert_eq!(config.retry.attempts, 3);
    }

    #[test]
    fn test_retry_config_default() {
        let retry = RetryConfig::default();
        assert_eq!(retry.attempts, 3);
        assert_eq!(retry.delay_ms, 1000);
    }
}
