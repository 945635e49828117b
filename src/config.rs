use thiserror::Error;

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
const MODEL_VAR: &str = "GEMINI_MODEL";
const GEMINI_URL_VAR: &str = "GEMINI_API_URL";
const TRANSLATE_URL_VAR: &str = "TRANSLATE_API_URL";

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: &'static str },
}

/// Process-wide settings, read once at startup and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub gemini_url: String,
    pub translate_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = read(API_KEY_VAR).ok_or(ConfigError::MissingApiKey {
            env_var: API_KEY_VAR,
        })?;

        Ok(Self {
            api_key,
            model: read(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_url: read(GEMINI_URL_VAR).unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            translate_url: read(TRANSLATE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_string()),
        })
    }
}
