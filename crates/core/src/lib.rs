pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod types;

pub use catalog::{AgentApp, AgentIcon, default_agents};
pub use config::{
    Config, ExecutionConfig, FileLoggingConfig, LoggingConfig, MarkerConfig, PrivacyLoggingConfig, ProviderConfig,
    RetrySettings, UserConfig,
};
pub use error::{AnalysisError, ChatError, ControllerError, Error, Result};
pub use store::{FOLLOW_LIMIT, FollowOutcome, Workspace};
pub use types::{
    BasicInfo, CompanyReport, CompanyUpdate, DataSource, FollowedCompany, HistoryCategory, HistoryItem, KeyPerson,
    Message, Opportunity, OpportunityKind, Risk, Role, Severity, UpdateKind, UserProfile, UserRole,
};
