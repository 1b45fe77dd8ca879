use serde::{Deserialize, Serialize};
use std::fmt;

/// The five concerns an analyzer can report on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Format,
    Keywords,
    Structure,
    Content,
    Contact,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Format,
        Category::Keywords,
        Category::Structure,
        Category::Content,
        Category::Contact,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Format => "Format",
            Category::Keywords => "Keywords",
            Category::Structure => "Structure",
            Category::Content => "Content",
            Category::Contact => "Contact",
        };
        write!(f, "{}", name)
    }
}

/// A single problem an analyzer found, phrased for end users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Issue {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// One analyzer's verdict for its category. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerFinding {
    pub category: Category,
    pub score: f64,
    pub issues: Vec<Issue>,
}

impl AnalyzerFinding {
    pub fn new(category: Category, score: f64) -> Self {
        Self {
            category,
            score: score.clamp(0.0, 100.0),
            issues: Vec::new(),
        }
    }

    pub fn with_issue(mut self, issue: Issue) -> Self {
        self.issues.push(issue);
        self
    }

    /// Neutral stand-in used when an analyzer fails and the run is configured
    /// to continue anyway.
    pub fn neutral(category: Category) -> Self {
        Self::new(category, 50.0)
            .with_issue(Issue::new("Analysis for this category was inconclusive"))
    }
}

/// High sorts first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// A category-level recommendation derived from a weak sub-score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementArea {
    pub category: Category,
    pub title: String,
    pub description: String,
    pub importance: Importance,
    pub suggestions: Vec<String>,
}

/// A concrete original-text-to-improved-text rewrite suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeMistake {
    pub section: String,
    pub title: String,
    pub original_text: String,
    pub improved_text: String,
    pub explanation: String,
}

/// One entry of the per-category score breakdown, unrounded for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
    pub weight: f64,
}

/// The consolidated output of one completed analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub breakdown: Vec<CategoryScore>,
    pub pass_likelihood: u8,
    pub feedback: String,
    pub improvement_areas: Vec<ImprovementArea>,
    pub mistakes: Vec<ResumeMistake>,
}

/// Lifecycle of one analysis session as exposed over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisState {
    Pending,
    Extracting,
    Analyzing,
    Complete,
    Failed { code: String, message: String },
}

impl AnalysisState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisState::Complete | AnalysisState::Failed { .. })
    }
}
