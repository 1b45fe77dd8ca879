//! Feature analyzers: five independent, pure `ExtractedText -> AnalyzerFinding`
//! passes, one per scoring category. Each is deterministic and testable on
//! crafted fixtures in isolation.

pub mod contact;
pub mod content;
pub mod format;
pub mod keywords;
pub mod structure;

pub use contact::ContactAnalyzer;
pub use content::ContentAnalyzer;
pub use format::FormatAnalyzer;
pub use keywords::KeywordAnalyzer;
pub use structure::StructureAnalyzer;

use crate::extract::ExtractedText;
use crate::models::{AnalyzerFinding, Category};

/// One scoring concern. Implementations must be pure: same input text, same
/// finding, no side effects beyond logging.
pub trait Analyzer: Send + Sync {
    fn category(&self) -> Category;

    /// Short lowercase name used in logs and error reports.
    fn name(&self) -> &'static str;

    fn analyze(&self, text: &ExtractedText) -> AnalyzerFinding;
}

/// The standard analyzer set, in category order. The keyword analyzer scores
/// against the job description when one was uploaded alongside the resume.
pub fn default_analyzers(job_description: Option<String>) -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(FormatAnalyzer),
        Box::new(KeywordAnalyzer::new(job_description)),
        Box::new(StructureAnalyzer),
        Box::new(ContentAnalyzer),
        Box::new(ContactAnalyzer),
    ]
}
