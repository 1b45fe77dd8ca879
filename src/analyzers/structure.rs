//! Structure analyzer: presence and clarity of the canonical section
//! headings an ATS keys its field mapping on.

use super::Analyzer;
use crate::extract::{sections, ExtractedText, SectionKind};
use crate::models::{AnalyzerFinding, Category, Issue};

const EXPERIENCE_POINTS: f64 = 28.0;
const EDUCATION_POINTS: f64 = 28.0;
const SKILLS_POINTS: f64 = 24.0;
const SUMMARY_POINTS: f64 = 12.0;
const SEGMENTATION_BONUS: f64 = 8.0;
const AMBIGUOUS_HEADING_PENALTY: f64 = 4.0;

/// Similarity below which a matched heading is still flagged as non-standard.
const CLEAR_HEADING_SIMILARITY: f64 = 0.95;

pub struct StructureAnalyzer;

impl Analyzer for StructureAnalyzer {
    fn category(&self) -> Category {
        Category::Structure
    }

    fn name(&self) -> &'static str {
        "structure"
    }

    fn analyze(&self, text: &ExtractedText) -> AnalyzerFinding {
        let mut score = 0.0;
        let mut issues = Vec::new();
        let mut present = 0usize;

        let expected = [
            (SectionKind::Experience, EXPERIENCE_POINTS, "Experience"),
            (SectionKind::Education, EDUCATION_POINTS, "Education"),
            (SectionKind::Skills, SKILLS_POINTS, "Skills"),
            (SectionKind::Summary, SUMMARY_POINTS, "Summary"),
        ];

        for (kind, points, name) in expected {
            if text.has_section(kind) {
                score += points;
                present += 1;
            } else {
                issues.push(
                    Issue::new(format!("Missing section heading: {}", name)).with_detail(
                        format!("Add a clearly labeled '{}' section so ATS field mapping works", name),
                    ),
                );
            }
        }

        if present >= 3 {
            score += SEGMENTATION_BONUS;
        }

        // Headings that only matched fuzzily still parse, but cleaner labels
        // are safer.
        for span in &text.sections {
            if span.kind == SectionKind::Other || span.heading.is_empty() {
                continue;
            }
            if let Some((_, similarity)) = sections::classify_heading(&span.heading) {
                if similarity < CLEAR_HEADING_SIMILARITY {
                    score -= AMBIGUOUS_HEADING_PENALTY;
                    issues.push(
                        Issue::new(format!("Non-standard heading: '{}'", span.heading))
                            .with_detail("Rename to a conventional section title"),
                    );
                }
            }
        }

        let mut finding = AnalyzerFinding::new(Category::Structure, score);
        finding.issues = issues;
        finding
    }
}
