pub mod adapter;
pub mod mock;
pub mod prompts;
pub mod retry;
pub mod schemas;
pub mod types;

pub use adapter::{Analyst, AnalystFactory, EMPTY_CHAT_REPLY, GeminiAnalyst, parse_report};
pub use mock::{ChatCall, MockAnalyst, MockCall, MockChat, MockResponse, ReportCall, sample_report};
pub use prompts::{chat_system_instruction, policy_prompt, report_prompt};
pub use retry::{RetryConfig, RetryingAnalyst, with_retry};
pub use schemas::company_report_schema;
pub use types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

pub use radar_core::{Error, Result};
