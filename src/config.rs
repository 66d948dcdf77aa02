use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    NotANumber { name: &'static str, value: String },
    #[error("{name} must be true or false, got {value:?}")]
    NotABool { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub default_city: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub weather_api_key: Option<String>,
    pub weather_base_url: String,
    pub dog_base_url: String,
    pub http_timeout: Duration,
    pub reports_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    pub fn from_env_with<F>(mut get: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut value = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = match value("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::NotANumber { name: "PORT", value: raw })?,
            None => 8080,
        };
        let timeout_secs: u64 = match value("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::NotANumber {
                name: "HTTP_TIMEOUT_SECS",
                value: raw,
            })?,
            None => 10,
        };
        let reports_enabled = match value("REPORTS_ENABLED") {
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::NotABool {
                        name: "REPORTS_ENABLED",
                        value: raw,
                    });
                }
            },
            None => true,
        };

        Ok(Self {
            port,
            default_city: value("HABIT_CITY").unwrap_or_else(|| "Seoul".into()),
            openai_api_key: value("OPENAI_API_KEY"),
            openai_model: value("OPENAI_MODEL").unwrap_or_else(|| "gpt-5-mini".into()),
            openai_base_url: value("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com".into()),
            weather_api_key: value("OPENWEATHERMAP_API_KEY"),
            weather_base_url: value("WEATHER_BASE_URL")
                .unwrap_or_else(|| "https://api.openweathermap.org".into()),
            dog_base_url: value("DOG_BASE_URL").unwrap_or_else(|| "https://dog.ceo".into()),
            http_timeout: Duration::from_secs(timeout_secs),
            reports_enabled,
        })
    }
}
