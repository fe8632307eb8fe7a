use reqwest::Client as HttpClient;
use std::sync::Arc;

use crate::mock::MockAnalyst;
use crate::prompts::{chat_system_instruction, report_prompt};
use crate::retry::{RetryConfig, RetryingAnalyst};
use crate::schemas::company_report_schema;
use crate::types::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use radar_core::logging::{LoggingConfig, PrivacyConfig, redact_sensitive};
use radar_core::{AnalysisError, ChatError, CompanyReport, Config, Message, ProviderConfig, Result};

/// Reply used when the chat service answers with no text
pub const EMPTY_CHAT_REPLY: &str = "Sorry, no answer is available right now.";

/// The external analysis collaborator
///
/// Implementations must be safe to share across tasks; the transcript
/// controller holds one behind an `Arc<dyn Analyst>`.
#[async_trait::async_trait]
pub trait Analyst: Send + Sync {
    /// Produce a structured report on `subject`
    async fn generate_report(
        &self, subject: &str, focus: &[String], capabilities: &str,
    ) -> std::result::Result<CompanyReport, AnalysisError>;

    /// Answer `message` given the prior conversation and a context string
    async fn chat(&self, history: &[Message], message: &str, context: &str) -> std::result::Result<String, ChatError>;
}

#[async_trait::async_trait]
impl<T: Analyst + ?Sized> Analyst for Arc<T> {
    async fn generate_report(
        &self, subject: &str, focus: &[String], capabilities: &str,
    ) -> std::result::Result<CompanyReport, AnalysisError> {
        (**self).generate_report(subject, focus, capabilities).await
    }

    async fn chat(&self, history: &[Message], message: &str, context: &str) -> std::result::Result<String, ChatError> {
        (**self).chat(history, message, context).await
    }
}

/// Transport failure shared by both calls before it is mapped onto the
/// call-specific error type
#[derive(Debug)]
enum CallError {
    Network(String),
    Api { status: u16, body: String },
    Parse(String),
}

impl From<CallError> for AnalysisError {
    fn from(e: CallError) -> Self {
        match e {
            CallError::Network(msg) => AnalysisError::Network(msg),
            CallError::Api { status, body } => AnalysisError::Api { status, body },
            CallError::Parse(msg) => AnalysisError::Parse(msg),
        }
    }
}

impl From<CallError> for ChatError {
    fn from(e: CallError) -> Self {
        match e {
            CallError::Network(msg) => ChatError::Network(msg),
            CallError::Api { status, body } => ChatError::Api { status, body },
            CallError::Parse(msg) => ChatError::Parse(msg),
        }
    }
}

/// Gemini analyst over the `generateContent` REST endpoint
pub struct GeminiAnalyst {
    client: HttpClient,
    api_key: String,
    base_url: String,
    report_model: String,
    chat_model: String,
    privacy: PrivacyConfig,
}

impl GeminiAnalyst {
    pub fn new(api_key: String, report_model: String, chat_model: String, base_url: Option<String>) -> Self {
        Self {
            client: HttpClient::new(),
            api_key,
            report_model,
            chat_model,
            base_url: base_url.unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            privacy: PrivacyConfig::default(),
        }
    }

    pub fn with_privacy(mut self, privacy: PrivacyConfig) -> Self {
        self.privacy = privacy;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), model)
    }

    async fn generate(
        &self, model: &str, request: &GenerateContentRequest,
    ) -> std::result::Result<GenerateContentResponse, CallError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CallError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(model, status = status.as_u16(), body = %redact_sensitive(&body, &self.privacy), "Gemini API error");
            return Err(CallError::Api { status: status.as_u16(), body });
        }

        let body = response.text().await.map_err(|e| CallError::Network(e.to_string()))?;
        tracing::debug!(model, body = %redact_sensitive(&body, &self.privacy), "Gemini response");
        serde_json::from_str(&body).map_err(|e| CallError::Parse(e.to_string()))
    }
}

/// Strip a Markdown code fence some models wrap JSON replies in
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse the report JSON returned by the service
pub fn parse_report(text: &str) -> std::result::Result<CompanyReport, AnalysisError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| AnalysisError::Parse(e.to_string()))
}

#[async_trait::async_trait]
impl Analyst for GeminiAnalyst {
    async fn generate_report(
        &self, subject: &str, focus: &[String], capabilities: &str,
    ) -> std::result::Result<CompanyReport, AnalysisError> {
        let prompt = report_prompt(subject, focus, capabilities);
        if self.privacy.log_prompts {
            tracing::trace!(subject, prompt = %prompt, "report prompt");
        }

        let request =
            GenerateContentRequest::prompt(prompt).with_generation_config(GenerationConfig::json(company_report_schema()));
        let response = self.generate(&self.report_model, &request).await?;
        let text = response.text().ok_or(AnalysisError::EmptyResponse)?;
        parse_report(&text)
    }

    async fn chat(&self, history: &[Message], message: &str, context: &str) -> std::result::Result<String, ChatError> {
        if self.privacy.log_prompts {
            tracing::trace!(message, context, "chat message");
        }

        let history: Vec<Message> = history.iter().filter(|m| !m.is_status_placeholder).cloned().collect();
        let request =
            GenerateContentRequest::conversation(&history, message).with_system_instruction(chat_system_instruction(context));
        let response = self.generate(&self.chat_model, &request).await?;
        Ok(response.text().unwrap_or_else(|| EMPTY_CHAT_REPLY.to_string()))
    }
}

/// Factory to create analysts from config
pub struct AnalystFactory;

impl AnalystFactory {
    pub fn create_from_config(config: &Config) -> Result<Arc<dyn Analyst>> {
        let retry = RetryConfig::from(&config.retry);
        match &config.provider {
            ProviderConfig::Gemini { api_key, report_model, chat_model, base_url } => {
                let privacy = LoggingConfig::from(config.logging.clone()).privacy;
                let analyst =
                    GeminiAnalyst::new(api_key.clone(), report_model.clone(), chat_model.clone(), Some(base_url.clone()))
                        .with_privacy(privacy);
                Ok(Arc::new(RetryingAnalyst::new(analyst, retry)))
            }
            ProviderConfig::Mock { responses_file } => {
                let analyst = match responses_file {
                    Some(path) => MockAnalyst::from_file(path)?,
                    None => MockAnalyst::new(),
                };
                Ok(Arc::new(analyst))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_analyst_creation() {
        let analyst = GeminiAnalyst::new("test-key".to_string(), "pro".to_string(), "flash".to_string(), None);
        assert_eq!(analyst.api_key, "test-key");
        assert_eq!(analyst.base_url, "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(
            analyst.endpoint("pro"),
            "https://generativelanguage.googleapis.com/v1beta/models/pro:generateContent"
        );
    }

    #[test]
    fn test_gemini_analyst_custom_url() {
        let analyst = GeminiAnalyst::new(
            "k".to_string(),
            "pro".to_string(),
            "flash".to_string(),
            Some("https://proxy.example.com/v1/".to_string()),
        );
        assert_eq!(analyst.endpoint("flash"), "https://proxy.example.com/v1/models/flash:generateContent");
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_report() {
        let report = parse_report(
            r#"```json
{"companyName":"Acme","basicInfo":{"overview":"o","industry":"Cloud"},"salesStrategy":"s"}
```"#,
        )
        .unwrap();
        assert_eq!(report.company_name, "Acme");

        assert!(matches!(parse_report("not json"), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn test_call_error_mapping() {
        let err: AnalysisError = CallError::Api { status: 503, body: "busy".to_string() }.into();
        assert!(err.is_retryable());
        let err: ChatError = CallError::Parse("bad".to_string()).into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_factory_mock_default() {
        let config = Config::default();
        assert!(AnalystFactory::create_from_config(&config).is_ok());
    }

    #[test]
    fn test_factory_mock_missing_file() {
        let config = Config::from_toml_str(
            r#"
[provider]
provider = "mock"
responses_file = "/nonexistent/radar-mock.toml"
"#,
        )
        .unwrap();
        assert!(AnalystFactory::create_from_config(&config).is_err());
    }

    #[test]
    fn test_factory_gemini() {
        let config = Config::from_toml_str(
            r#"
[provider]
provider = "gemini"
api_key = "secret"
"#,
        )
        .unwrap();
        assert!(AnalystFactory::create_from_config(&config).is_ok());
    }
}
