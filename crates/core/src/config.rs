use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::logging::{LogFormat, ResponseLogging};
use crate::types::UserProfile;

/// Analysis service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// Google Gemini `generateContent` API
    Gemini {
        /// API key for authentication
        api_key: String,
        /// Model used for structured company reports
        #[serde(default = "default_report_model")]
        report_model: String,
        /// Model used for follow-up chat
        #[serde(default = "default_chat_model")]
        chat_model: String,
        /// Base URL for the API
        #[serde(default = "default_gemini_base_url")]
        base_url: String,
    },
    /// Scripted responses, no network
    Mock {
        /// TOML file with `[[responses]]` entries
        #[serde(default)]
        responses_file: Option<PathBuf>,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::Mock { responses_file: None }
    }
}

impl ProviderConfig {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderConfig::Gemini { .. } => "gemini",
            ProviderConfig::Mock { .. } => "mock",
        }
    }
}

fn default_report_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_chat_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Timing and user-facing texts of scripted executions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Pause before each progress step
    pub step_delay_ms: u64,
    /// Upper bound on a single collaborator call
    pub request_timeout_secs: u64,
    /// Shown when a report cannot be produced
    pub report_failure_notice: String,
    /// Shown when a chat reply cannot be produced
    pub chat_failure_notice: String,
    /// Shown when the user cancels a running execution
    pub cancelled_notice: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 800,
            request_timeout_secs: 120,
            report_failure_notice:
                "Task failed: could not retrieve usable data for this company, or the request timed out.".to_string(),
            chat_failure_notice: "System error, please retry.".to_string(),
            cancelled_notice: "Execution cancelled.".to_string(),
        }
    }
}

impl ExecutionConfig {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Bounded retry for collaborator calls (1 attempt = no retry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self { max_attempts: 1, initial_delay_ms: 1000, max_delay_ms: 30000, backoff_multiplier: 2.0 }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter for stderr output
    pub level: String,
    /// `pretty`, `json` or `compact`
    pub format: String,
    pub file: FileLoggingConfig,
    pub privacy: PrivacyLoggingConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
            file: FileLoggingConfig::default(),
            privacy: PrivacyLoggingConfig::default(),
        }
    }
}

/// `[logging.file]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileLoggingConfig {
    pub enabled: bool,
    pub level: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self { enabled: false, level: "debug".to_string() }
    }
}

/// `[logging.privacy]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrivacyLoggingConfig {
    /// Log prompts and chat text sent to the analysis service
    pub log_prompts: bool,
    /// `none`, `truncate` or `full`
    pub log_responses: String,
    pub truncate_length: usize,
}

impl Default for PrivacyLoggingConfig {
    fn default() -> Self {
        Self { log_prompts: false, log_responses: "truncate".to_string(), truncate_length: 500 }
    }
}

/// Bracketed markers that classify `**...**` spans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    pub highlight: Vec<String>,
    pub key_person: Vec<String>,
    pub opportunity: Vec<String>,
    pub risk: Vec<String>,
    pub strategy: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            highlight: vec!["[Key Update]".to_string(), "[Key Point]".to_string()],
            key_person: vec!["[Key Person]".to_string()],
            opportunity: vec!["[Opportunity]".to_string()],
            risk: vec!["[Risk Alert]".to_string()],
            strategy: vec!["[Sales Strategy]".to_string(), "[Conclusion]".to_string()],
        }
    }
}

impl MarkerConfig {
    fn all(&self) -> impl Iterator<Item = &String> {
        self.highlight
            .iter()
            .chain(&self.key_person)
            .chain(&self.opportunity)
            .chain(&self.risk)
            .chain(&self.strategy)
    }
}

/// `[user]` section, seeds the workspace profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    pub name: String,
    pub email: String,
    pub industries: Vec<String>,
    pub business_capabilities: String,
}

impl From<UserConfig> for UserProfile {
    fn from(config: UserConfig) -> Self {
        UserProfile {
            name: config.name,
            email: config.email,
            industries: config.industries,
            business_capabilities: config.business_capabilities,
            ..Default::default()
        }
    }
}

/// Root configuration structure for radar.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub provider: ProviderConfig,
    pub execution: ExecutionConfig,
    pub retry: RetrySettings,
    pub logging: LoggingConfig,
    pub markers: MarkerConfig,
    pub user: UserConfig,
}

impl Config {
    /// Load configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).map_err(|e| Error::Config(format!("TOML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if let ProviderConfig::Gemini { api_key, .. } = &self.provider
            && api_key.trim().is_empty()
        {
            return Err(Error::Config(ConfigError::MissingApiKey.to_string()));
        }

        if self.execution.request_timeout_secs == 0 {
            return Err(Error::Config(
                ConfigError::InvalidValue("execution.request_timeout_secs must be positive".to_string()).to_string(),
            ));
        }

        if self.retry.max_attempts == 0 {
            return Err(Error::Config(
                ConfigError::InvalidValue("retry.max_attempts must be at least 1".to_string()).to_string(),
            ));
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err(Error::Config(
                ConfigError::InvalidValue("retry.backoff_multiplier must be >= 1.0".to_string()).to_string(),
            ));
        }

        if LogFormat::parse_str(&self.logging.format).is_none() {
            let known: Vec<&str> = LogFormat::VALUES.iter().map(LogFormat::as_str).collect();
            return Err(Error::Config(
                ConfigError::InvalidValue(format!("logging.format must be one of {}", known.join(", "))).to_string(),
            ));
        }

        if let Err(e) = self.logging.privacy.log_responses.parse::<ResponseLogging>() {
            return Err(Error::Config(ConfigError::InvalidValue(e).to_string()));
        }

        if let Some(marker) = self.markers.all().find(|m| m.trim().is_empty()) {
            return Err(Error::Config(ConfigError::InvalidMarker(marker.clone()).to_string()));
        }

        Ok(())
    }

    /// Get example configuration (as a string)
    pub fn example() -> &'static str {
        r#"# Radar Configuration Example

[provider]
# "gemini" or "mock"
provider = "gemini"
api_key = "your-api-key-here"
report_model = "gemini-2.5-pro"
chat_model = "gemini-2.5-flash"
# base_url = "https://generativelanguage.googleapis.com/v1beta"

[execution]
# Pause between progress steps while a report is prepared
step_delay_ms = 800
# Upper bound on one call to the analysis service
request_timeout_secs = 120

[retry]
# 1 disables retries
max_attempts = 1
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[logging]
level = "warn"
format = "pretty"

[logging.file]
enabled = false
level = "debug"

[logging.privacy]
log_prompts = false
log_responses = "truncate"
truncate_length = 500

[markers]
highlight = ["[Key Update]", "[Key Point]"]
key_person = ["[Key Person]"]
opportunity = ["[Opportunity]"]
risk = ["[Risk Alert]"]
strategy = ["[Sales Strategy]", "[Conclusion]"]

[user]
name = "Alex Chen"
email = "alex.chen@example.com"
industries = ["Technology"]
business_capabilities = "Enterprise cloud platform, big-data analytics and AI customer service."
"#
    }
}

/// Configuration-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("provider.api_key is required for the gemini provider")]
    MissingApiKey,

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("marker must not be blank: {0:?}")]
    InvalidMarker(String),
}
