use crate::domain::shared::RetryPolicy;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // OpenAI
    pub openai_api_key: Option<String>,
    pub openai_story_model: String,
    pub openai_image_model: String,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // Speech
    pub tts_provider: TtsProvider,
    pub aws_region: String,
    pub polly_voice: String,
    // Retry
    pub retry_max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub provider_timeout_secs: u64,
    // Audio cache
    pub audio_cache_capacity: u64,
    pub audio_cache_ttl_minutes: u64,
    // Bearer token required on /api routes when set
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    OpenAi,
    Polly,
}

impl TtsProvider {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "polly" | "aws" => TtsProvider::Polly,
            _ => TtsProvider::OpenAi,
        }
    }
}

/// Unset and blank variables both count as absent
fn optional_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_story_model: env::var("OPENAI_STORY_MODEL")
                .unwrap_or_else(|_| "gpt-4".to_string()),
            openai_image_model: env::var("OPENAI_IMAGE_MODEL")
                .unwrap_or_else(|_| "dall-e-3".to_string()),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            openai_tts_voice: env::var("OPENAI_TTS_VOICE").unwrap_or_else(|_| "alloy".to_string()),
            tts_provider: TtsProvider::parse(
                &env::var("TTS_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
            ),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            polly_voice: env::var("POLLY_VOICE").unwrap_or_else(|_| "Joanna".to_string()),
            retry_max_attempts: env::var("RETRY_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
            retry_base_delay_ms: env::var("RETRY_BASE_DELAY_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,
            audio_cache_capacity: env::var("AUDIO_CACHE_CAPACITY")
                .unwrap_or_else(|_| "100".to_string())
                .parse()?,
            audio_cache_ttl_minutes: env::var("AUDIO_CACHE_TTL_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            api_token: optional_var("API_TOKEN"),
        };

        if config.retry_max_attempts == 0 {
            return Err("RETRY_MAX_ATTEMPTS must be at least 1".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Retry policy applied to every provider call
    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
        );

        if self.provider_timeout_secs > 0 {
            policy.with_attempt_timeout(Duration::from_secs(self.provider_timeout_secs))
        } else {
            policy
        }
    }

    pub fn audio_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.audio_cache_ttl_minutes.saturating_mul(60))
    }
}
