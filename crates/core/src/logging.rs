//! Logging setup on the tracing ecosystem.
//!
//! # Environment Variables
//!
//! - `RADAR_LOG`: Filter directive (like `RUST_LOG`), e.g., `radar_ui=debug`
//! - `RADAR_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `RADAR_LOG_DIR`: Directory for file logs (default `~/.radar/logs`)
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! level = "warn"
//! format = "pretty"
//!
//! [logging.file]
//! enabled = true
//! level = "debug"
//!
//! [logging.privacy]
//! log_prompts = false
//! log_responses = "truncate"
//! truncate_length = 500
//! ```
//!
//! # Example
//!
//! ```no_run
//! use radar_core::logging;
//!
//! let _guard = logging::init_logging(None)?;
//! # Ok::<(), radar_core::Error>(())
//! ```

use crate::Error;
use crate::config::LoggingConfig as ConfigLoggingConfig;
use std::env;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

/// How to log analysis service responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseLogging {
    /// Don't log response bodies.
    None,
    /// Log truncated bodies (up to `truncate_length` chars).
    #[default]
    Truncate,
    /// Log full bodies (may include customer data).
    Full,
}

impl ResponseLogging {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(ResponseLogging::None),
            "truncate" => Some(ResponseLogging::Truncate),
            "full" => Some(ResponseLogging::Full),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseLogging::None => "none",
            ResponseLogging::Truncate => "truncate",
            ResponseLogging::Full => "full",
        }
    }
}

impl FromStr for ResponseLogging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseLogging::parse_str(s).ok_or_else(|| format!("invalid response logging: {}", s))
    }
}

/// Privacy configuration for sensitive content in logs.
#[derive(Debug, Clone)]
pub struct PrivacyConfig {
    /// Include prompts and chat text in trace logs.
    pub log_prompts: bool,
    /// How to handle response bodies in logs.
    pub log_responses: ResponseLogging,
    /// Maximum length for truncated content.
    pub truncate_length: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self { log_prompts: false, log_responses: ResponseLogging::default(), truncate_length: 500 }
    }
}

/// Resolved logging settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level for stderr output.
    pub level: String,
    /// Output format for stderr.
    pub format: LogFormat,
    /// Filter for the rolling log file; `None` disables file output.
    pub file_level: Option<String>,
    pub privacy: PrivacyConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: LogFormat::default(), file_level: None, privacy: PrivacyConfig::default() }
    }
}

impl From<ConfigLoggingConfig> for LoggingConfig {
    fn from(config: ConfigLoggingConfig) -> Self {
        let format = LogFormat::parse_str(&config.format).unwrap_or_default();
        let log_responses = ResponseLogging::parse_str(&config.privacy.log_responses).unwrap_or_default();

        Self {
            level: config.level,
            format,
            file_level: config.file.enabled.then_some(config.file.level),
            privacy: PrivacyConfig {
                log_prompts: config.privacy.log_prompts,
                log_responses,
                truncate_length: config.privacy.truncate_length,
            },
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_file_logging(mut self, level: impl Into<String>) -> Self {
        self.file_level = Some(level.into());
        self
    }

    pub fn with_privacy(mut self, config: PrivacyConfig) -> Self {
        self.privacy = config;
        self
    }

    /// Filter directive: `RADAR_LOG`, then `RUST_LOG`, then the configured level.
    fn filter_directive(&self) -> String {
        env::var("RADAR_LOG")
            .ok()
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| self.level.clone())
    }

    fn is_tty() -> bool {
        atty::is(atty::Stream::Stderr)
    }

    fn detect_format(&self) -> LogFormat {
        if let Ok(fmt_str) = env::var("RADAR_LOG_FORMAT")
            && let Some(fmt) = LogFormat::parse_str(&fmt_str)
        {
            return fmt;
        }

        if Self::is_tty() { self.format } else { LogFormat::Compact }
    }

    fn get_log_dir() -> Result<PathBuf, Error> {
        if let Ok(custom_dir) = env::var("RADAR_LOG_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;

        Ok(PathBuf::from(home).join(".radar").join("logs"))
    }
}

/// Initialize the global tracing subscriber.
///
/// Stderr output uses the configured format; when file logging is enabled a
/// JSON layer writes to a daily rolling file. The returned guard flushes the
/// file writer on drop and must be kept alive for the life of the program.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<Option<WorkerGuard>, Error> {
    let config = config.unwrap_or_default();
    let format = config.detect_format();

    let stderr_filter = EnvFilter::new(config.filter_directive());
    let stderr_layer = match format {
        LogFormat::Pretty => fmt::layer().pretty().with_writer(io::stderr).with_ansi(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(io::stderr).boxed(),
    }
    .with_filter(stderr_filter);

    let registry = Registry::default().with(stderr_layer);

    match &config.file_level {
        Some(file_level) => {
            let log_dir = LoggingConfig::get_log_dir()?;
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| Error::Config(format!("Failed to create log directory: {}", e)))?;

            let file_appender = tracing_appender::rolling::daily(log_dir, "radar.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let file_layer = fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new(file_level));

            registry
                .with(file_layer)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to install subscriber: {}", e)))?;
            Ok(Some(guard))
        }
        None => {
            registry
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to install subscriber: {}", e)))?;
            Ok(None)
        }
    }
}

/// Redact long content based on privacy settings.
pub fn redact_sensitive(content: &str, privacy: &PrivacyConfig) -> String {
    if privacy.log_responses == ResponseLogging::None {
        return "[REDACTED]".to_string();
    }

    let total = content.chars().count();
    if total <= privacy.truncate_length || privacy.log_responses == ResponseLogging::Full {
        return content.to_string();
    }

    let mut truncated = content.chars().take(privacy.truncate_length).collect::<String>();
    truncated.push_str("...");
    truncated.push_str(&format!(" ({} total chars)", total));
    truncated
}
