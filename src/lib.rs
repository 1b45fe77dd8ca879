//! ResumeLens: ATS compatibility scoring for uploaded resumes.
//!
//! The pipeline extracts text from a PDF or DOCX upload, segments it into
//! resume sections, runs a fixed set of analyzers over the text, and
//! aggregates their findings into an overall score with prioritized
//! improvement areas and concrete rewrite suggestions. Every step is
//! deterministic: the same bytes always yield the same report.

pub mod analyzers;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod orchestrator;
pub mod recommend;
pub mod rewrite;
pub mod scoring;

pub use config::Config;
pub use error::{AppError, AppResult};
