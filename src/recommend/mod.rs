//! Recommendation generator: turns weak analyzer findings into prioritized,
//! category-level improvement areas whose suggestions quote the specific
//! issues found.

use crate::models::{AnalyzerFinding, Category, ImprovementArea, Importance, Issue};

/// Sub-score below which a finding is treated as severe.
const HIGH_IMPORTANCE_CUTOFF: f64 = 50.0;

/// Categories that only ever produce advisory (Low) recommendations.
const ADVISORY_CATEGORIES: &[Category] = &[Category::Contact];

fn title_for(category: Category) -> &'static str {
    match category {
        Category::Format => "Resume Format Issues",
        Category::Keywords => "Missing Industry Keywords",
        Category::Structure => "Section Headings",
        Category::Content => "Quantifiable Achievements",
        Category::Contact => "Contact Information",
    }
}

fn description_for(category: Category) -> &'static str {
    match category {
        Category::Format => {
            "Your resume may have formatting issues that could affect ATS parsing."
        }
        Category::Keywords => "Your resume is missing key terms that ATS systems look for.",
        Category::Structure => {
            "Some standard section headings appear to be missing or non-standard."
        }
        Category::Content => "Your resume lacks quantifiable achievements and results.",
        Category::Contact => {
            "Your contact information may be incomplete or formatted incorrectly."
        }
    }
}

fn closing_tip(category: Category) -> &'static str {
    match category {
        Category::Format => "Use a single-column layout without tables, text boxes, or graphics",
        Category::Keywords => {
            "Mirror the wording of the job description for the skills you actually have"
        }
        Category::Structure => {
            "Use standard section headers like 'Work Experience', 'Education', and 'Skills'"
        }
        Category::Content => {
            "Add metrics to showcase your impact, for example 'increased sales by 20%'"
        }
        Category::Contact => "Keep name, phone, email, and LinkedIn at the top of the resume",
    }
}

fn importance_for(category: Category, score: f64) -> Importance {
    if ADVISORY_CATEGORIES.contains(&category) {
        Importance::Low
    } else if score < HIGH_IMPORTANCE_CUTOFF {
        Importance::High
    } else {
        Importance::Medium
    }
}

fn suggestion_from(issue: &Issue) -> String {
    match &issue.detail {
        Some(detail) => format!("{} ({})", issue.summary, detail),
        None => issue.summary.clone(),
    }
}

/// Emit exactly one ImprovementArea per finding under the threshold, sorted
/// by importance then category. Findings at or above the threshold produce
/// nothing.
pub fn generate(findings: &[AnalyzerFinding], threshold: f64) -> Vec<ImprovementArea> {
    let mut areas: Vec<ImprovementArea> = findings
        .iter()
        .filter(|f| f.score < threshold)
        .map(|finding| {
            let mut suggestions: Vec<String> =
                finding.issues.iter().map(suggestion_from).collect();
            suggestions.push(closing_tip(finding.category).to_string());
            ImprovementArea {
                category: finding.category,
                title: title_for(finding.category).to_string(),
                description: description_for(finding.category).to_string(),
                importance: importance_for(finding.category, finding.score),
                suggestions,
            }
        })
        .collect();

    areas.sort_by_key(|a| (a.importance, a.category));
    areas
}
