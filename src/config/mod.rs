//! Service Configuration
//!
//! All settings are sourced from the environment (optionally seeded from a `.env` file)
//! and every key has a default, so the service starts with no configuration at all.

use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;


pub const DEFAULT_MODEL_NAME: &str = "distilbert-base-nli-mean-tokens";
pub const DEFAULT_DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
pub const DEFAULT_OFFENSIVE_WORDS: [&str; 3] = ["badword1", "badword2", "badword3"];

/// Which result store backend to construct at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown backend '{}', expected redis or memory", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub model_name: String,
    pub max_keywords: usize,
    pub keyword_diversity: f32,
    pub api_host: String,
    pub api_port: u16,
    pub log_level: String,
    pub redis_url: String,
    pub redis_timeout: Duration,
    pub store_backend: StoreBackend,
    pub dictionary_api_url: String,
    pub include_definitions: bool,
    pub reject_offensive: bool,
    pub offensive_words: Vec<String>,
    pub worker_count: usize,
    pub queue_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            max_keywords: 10,
            keyword_diversity: 0.7,
            api_host: "0.0.0.0".to_string(),
            api_port: 5000,
            log_level: "info".to_string(),
            redis_url: "redis://localhost".to_string(),
            redis_timeout: Duration::from_secs(5),
            store_backend: StoreBackend::Redis,
            dictionary_api_url: DEFAULT_DICTIONARY_API_URL.to_string(),
            include_definitions: true,
            reject_offensive: true,
            offensive_words: DEFAULT_OFFENSIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            worker_count: 4,
            queue_capacity: 1024,
        }
    }
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Missing keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_keywords: usize = parse_or(&lookup, "MAX_KEYWORDS", defaults.max_keywords)?;
        if max_keywords == 0 {
            return Err(invalid("MAX_KEYWORDS", "0", "must be greater than zero"));
        }

        let keyword_diversity: f32 =
            parse_or(&lookup, "KEYWORD_DIVERSITY", defaults.keyword_diversity)?;
        if !(0.0..=1.0).contains(&keyword_diversity) {
            return Err(invalid(
                "KEYWORD_DIVERSITY",
                &keyword_diversity.to_string(),
                "must be between 0 and 1",
            ));
        }

        let redis_timeout_secs: f64 = parse_or(&lookup, "REDIS_TIMEOUT", 5.0)?;
        if !redis_timeout_secs.is_finite() || redis_timeout_secs <= 0.0 {
            return Err(invalid(
                "REDIS_TIMEOUT",
                &redis_timeout_secs.to_string(),
                "must be a positive number of seconds",
            ));
        }

        let worker_count: usize = parse_or(&lookup, "WORKER_COUNT", defaults.worker_count)?;
        if worker_count == 0 {
            return Err(invalid("WORKER_COUNT", "0", "must be greater than zero"));
        }

        let queue_capacity: usize =
            parse_or(&lookup, "QUEUE_CAPACITY", defaults.queue_capacity)?;
        if queue_capacity == 0 {
            return Err(invalid("QUEUE_CAPACITY", "0", "must be greater than zero"));
        }

        let offensive_words = match lookup("OFFENSIVE_WORDS") {
            Some(raw) => raw
                .split(',')
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            None => defaults.offensive_words,
        };

        Ok(Self {
            model_name: lookup("AI_MODEL_NAME").unwrap_or(defaults.model_name),
            max_keywords,
            keyword_diversity,
            api_host: lookup("API_HOST").unwrap_or(defaults.api_host),
            api_port: parse_or(&lookup, "API_PORT", defaults.api_port)?,
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            redis_url: lookup("REDIS_URL").unwrap_or(defaults.redis_url),
            redis_timeout: Duration::from_secs_f64(redis_timeout_secs),
            store_backend: parse_or(&lookup, "RESULT_STORE", defaults.store_backend)?,
            dictionary_api_url: lookup("DICTIONARY_API_URL")
                .unwrap_or(defaults.dictionary_api_url),
            include_definitions: parse_bool_or(
                &lookup,
                "INCLUDE_DEFINITIONS",
                defaults.include_definitions,
            )?,
            reject_offensive: parse_bool_or(
                &lookup,
                "REJECT_OFFENSIVE",
                defaults.reject_offensive,
            )?,
            offensive_words,
            worker_count,
            queue_capacity,
        })
    }

    /// Host and port for the listener. The host may be an IP literal or a name such as
    /// `localhost`; it is resolved when the listener binds.
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.api_host.as_str(), self.api_port)
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: <T as FromStr>::Err| invalid(key, &raw, &e.to_string())),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(invalid(key, &raw, "expected a boolean")),
        },
        None => Ok(default),
    }
}
