//! Application configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,

    // Generation
    pub history_path: PathBuf,
    pub audio_base_url: String,
    pub generation_delay_ms: u64,

    // Billing
    pub payment_success_rate: f64,

    // Feature flags
    pub enable_billing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            history_path: PathBuf::from("data/musicdata/music.json"),
            audio_base_url: "https://example.com".to_string(),
            generation_delay_ms: 2000,
            payment_success_rate: 0.95,
            enable_billing: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),

            // Generation
            history_path: env::var("HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            audio_base_url: env::var("AUDIO_BASE_URL")
                .unwrap_or(defaults.audio_base_url)
                .trim_end_matches('/')
                .to_string(),
            generation_delay_ms: env::var("GENERATION_DELAY_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .unwrap_or(defaults.generation_delay_ms),

            // Billing
            payment_success_rate: match env::var("PAYMENT_SUCCESS_RATE") {
                Ok(raw) => {
                    let rate: f64 = raw.trim().parse().map_err(|_| {
                        ConfigError::Invalid("PAYMENT_SUCCESS_RATE", format!("{raw:?} is not a number"))
                    })?;
                    if !(0.0..=1.0).contains(&rate) {
                        return Err(ConfigError::Invalid(
                            "PAYMENT_SUCCESS_RATE",
                            format!("{rate} is outside 0..=1"),
                        ));
                    }
                    rate
                }
                Err(_) => defaults.payment_success_rate,
            },

            // Feature flags
            enable_billing: env::var("ENABLE_BILLING")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(defaults.enable_billing),
        })
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
