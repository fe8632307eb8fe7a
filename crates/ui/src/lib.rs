pub mod controller;
pub mod richtext;
pub mod theme;
pub mod transcript;
pub mod view;

pub use controller::{
    ExecutionKind, ExecutionOutcome, ExecutionPhase, ExecutionPlan, FinalizedTranscript, TranscriptController,
};
pub use richtext::{Fragment, Renderer, TagCategory, TagVocabulary, render};
pub use theme::Theme;
pub use transcript::{FeedbackBook, FeedbackReason, FeedbackState, NavPoint, Transcript};
pub use view::TranscriptView;
