use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;
use crate::resources::ResourceTable;
use crate::topic::KeywordTable;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_MODEL: &str = "anthropic/claude-3-sonnet-20240229";
const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 500;
const DEFAULT_QUIZ_MAX_TOKENS: u32 = 700;

/// Server configuration loaded from environment variables.
///
/// Oracle connection settings (base URL, API key, timeout) live in
/// [`study_common::openai::OpenAiClientConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Model ID sent with every oracle request.
    pub model: String,
    pub summary_max_tokens: u32,
    pub quiz_max_tokens: u32,
    /// JSON keyword table replacing the built-in one.
    pub keywords_path: Option<PathBuf>,
    /// JSON study resource table replacing the built-in one.
    pub resources_path: Option<PathBuf>,
    pub rate_limit_rps: Option<u32>,
}

impl Config {
    /// Optional:
    /// - `STUDY_AID_LISTEN_ADDR` (default: "0.0.0.0:4000")
    /// - `STUDY_AID_MODEL`
    /// - `STUDY_AID_SUMMARY_MAX_TOKENS` / `STUDY_AID_QUIZ_MAX_TOKENS`
    /// - `STUDY_KEYWORDS_PATH` / `STUDY_RESOURCES_PATH`
    /// - `RATE_LIMIT_RPS`
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let raw_addr =
            var("STUDY_AID_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr.trim().parse::<SocketAddr>().map_err(|e| {
            AppError::Config(format!("invalid STUDY_AID_LISTEN_ADDR {raw_addr:?}: {e}"))
        })?;

        let model = var("STUDY_AID_MODEL")
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let positive = |key: &str| {
            var(key)
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|&n| n > 0)
        };

        let path = |key: &str| {
            var(key)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
        };

        Ok(Self {
            listen_addr,
            model,
            summary_max_tokens: positive("STUDY_AID_SUMMARY_MAX_TOKENS")
                .unwrap_or(DEFAULT_SUMMARY_MAX_TOKENS),
            quiz_max_tokens: positive("STUDY_AID_QUIZ_MAX_TOKENS")
                .unwrap_or(DEFAULT_QUIZ_MAX_TOKENS),
            keywords_path: path("STUDY_KEYWORDS_PATH"),
            resources_path: path("STUDY_RESOURCES_PATH"),
            rate_limit_rps: positive("RATE_LIMIT_RPS"),
        })
    }

    pub fn keyword_table(&self) -> Result<KeywordTable, AppError> {
        match &self.keywords_path {
            Some(path) => KeywordTable::from_path(path),
            None => Ok(KeywordTable::builtin()),
        }
    }

    pub fn resource_table(&self) -> Result<ResourceTable, AppError> {
        match &self.resources_path {
            Some(path) => ResourceTable::from_path(path),
            None => Ok(ResourceTable::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:4000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.summary_max_tokens, 500);
        assert_eq!(config.quiz_max_tokens, 700);
        assert!(config.keywords_path.is_none());
        assert!(config.rate_limit_rps.is_none());
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("STUDY_AID_QUIZ_MAX_TOKENS", "lots"),
            ("STUDY_AID_SUMMARY_MAX_TOKENS", "0"),
            ("RATE_LIMIT_RPS", "-3"),
        ])
        .unwrap();
        assert_eq!(config.quiz_max_tokens, 700);
        assert_eq!(config.summary_max_tokens, 500);
        assert!(config.rate_limit_rps.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("STUDY_AID_LISTEN_ADDR", "127.0.0.1:8080"),
            ("STUDY_AID_MODEL", "openai/gpt-4o-mini"),
            ("RATE_LIMIT_RPS", "5"),
            ("STUDY_KEYWORDS_PATH", "/etc/study/keywords.json"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.model, "openai/gpt-4o-mini");
        assert_eq!(config.rate_limit_rps, Some(5));
        assert_eq!(
            config.keywords_path,
            Some(PathBuf::from("/etc/study/keywords.json"))
        );
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let err = config_from(&[("STUDY_AID_LISTEN_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn missing_table_file_is_config_error() {
        let config = config_from(&[("STUDY_RESOURCES_PATH", "/nonexistent/resources.json")])
            .unwrap();
        assert!(matches!(config.resource_table(), Err(AppError::Config(_))));
    }
}
