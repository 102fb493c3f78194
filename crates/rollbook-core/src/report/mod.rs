//! Aggregation engine and report text builders.

mod render;
pub mod stats;

pub use render::{registration_report, student_report};
pub use stats::{RegistrationStats, StatusBreakdown, StudentStats};
