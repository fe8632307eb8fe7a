use std::future::Future;
use std::time::Duration;

use crate::adapter::Analyst;
use radar_core::{AnalysisError, ChatError, CompanyReport, Message, RetrySettings};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_attempts: 3, initial_delay_ms: 1000, max_delay_ms: 30000, backoff_multiplier: 2.0 }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            initial_delay_ms: settings.initial_delay_ms,
            max_delay_ms: settings.max_delay_ms,
            backoff_multiplier: settings.backoff_multiplier,
        }
    }
}

impl RetryConfig {
    /// Calculate delay for the given attempt (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = if attempt == 0 {
            0
        } else {
            let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32 - 1);
            delay.min(self.max_delay_ms as f64) as u64
        };

        Duration::from_millis(delay_ms)
    }

    /// Check if we should retry given the attempt number
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Errors that know whether another attempt may help
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for AnalysisError {
    fn is_retryable(&self) -> bool {
        AnalysisError::is_retryable(self)
    }
}

impl Retryable for ChatError {
    fn is_retryable(&self) -> bool {
        ChatError::is_retryable(self)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget is spent
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, label: &str, mut op: F) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempt += 1;
                if !e.is_retryable() || !config.should_retry(attempt) {
                    return Err(e);
                }
                tracing::warn!(call = label, attempt, error = %e, "retrying after failure");
            }
        }
    }
}

/// Wraps an analyst with bounded exponential backoff on retryable errors
pub struct RetryingAnalyst<A> {
    inner: A,
    config: RetryConfig,
}

impl<A: Analyst> RetryingAnalyst<A> {
    pub fn new(inner: A, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait::async_trait]
impl<A: Analyst> Analyst for RetryingAnalyst<A> {
    async fn generate_report(
        &self, subject: &str, focus: &[String], capabilities: &str,
    ) -> Result<CompanyReport, AnalysisError> {
        with_retry(&self.config, "generate_report", || self.inner.generate_report(subject, focus, capabilities)).await
    }

    async fn chat(&self, history: &[Message], message: &str, context: &str) -> Result<String, ChatError> {
        with_retry(&self.config, "chat", || self.inner.chat(history, message, context)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockAnalyst, MockChat};

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay_ms, 1000);
    }

    #[test]
    fn test_retry_config_from_settings() {
        let settings = RetrySettings { max_attempts: 0, initial_delay_ms: 10, max_delay_ms: 20, backoff_multiplier: 1.5 };
        let config = RetryConfig::from(&settings);
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.initial_delay_ms, 10);
    }

    #[test]
    fn test_retry_delay_calculation() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for_attempt(0).as_millis(), 0);
        assert_eq!(config.delay_for_attempt(1).as_millis(), 1000);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 2000);
    }

    #[test]
    fn test_retry_delay_with_max() {
        let config =
            RetryConfig { initial_delay_ms: 1000, backoff_multiplier: 10.0, max_delay_ms: 5000, ..Default::default() };

        assert_eq!(config.delay_for_attempt(1).as_millis(), 1000);
        assert_eq!(config.delay_for_attempt(2).as_millis(), 5000);
        assert_eq!(config.delay_for_attempt(3).as_millis(), 5000);
    }

    #[test]
    fn test_should_retry() {
        let config = RetryConfig { max_attempts: 3, ..Default::default() };

        assert!(config.should_retry(0));
        assert!(config.should_retry(2));
        assert!(!config.should_retry(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrying_analyst_recovers_from_retryable_error() {
        let mock = MockAnalyst::new()
            .with_chat(MockChat::Error(ChatError::Network("reset".to_string())))
            .with_chat(MockChat::Reply("second time lucky".to_string()));
        let analyst = RetryingAnalyst::new(mock, RetryConfig::default());

        let reply = analyst.chat(&[], "hello", "ctx").await.unwrap();
        assert_eq!(reply, "second time lucky");
        assert_eq!(analyst.inner().chat_calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrying_analyst_stops_on_fatal_error() {
        let mock = MockAnalyst::new()
            .with_chat(MockChat::Error(ChatError::Api { status: 400, body: "bad".to_string() }))
            .with_chat(MockChat::Reply("never reached".to_string()));
        let analyst = RetryingAnalyst::new(mock, RetryConfig::default());

        assert!(analyst.chat(&[], "hello", "ctx").await.is_err());
        assert_eq!(analyst.inner().chat_calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrying_analyst_gives_up_after_budget() {
        let mock = MockAnalyst::new()
            .with_report(Err(AnalysisError::Timeout(Duration::from_secs(1))))
            .with_report(Err(AnalysisError::Timeout(Duration::from_secs(1))))
            .with_report(Err(AnalysisError::Timeout(Duration::from_secs(1))));
        let analyst = RetryingAnalyst::new(mock, RetryConfig { max_attempts: 2, ..Default::default() });

        let result = analyst.generate_report("Acme", &[], "").await;
        assert!(matches!(result, Err(AnalysisError::Timeout(_))));
        assert_eq!(analyst.inner().report_calls().len(), 2);
    }
}
