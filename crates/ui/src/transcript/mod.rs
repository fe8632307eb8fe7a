mod feedback;
mod nav;
mod state;

pub use feedback::{FeedbackBook, FeedbackReason, FeedbackState};
pub use nav::{NavPoint, REPORT_SECTION_LABELS, nav_points};
pub use state::Transcript;
