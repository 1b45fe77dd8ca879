//! Format analyzer: layout risks that break ATS parsers. Works from the
//! extraction metadata side channel plus text-shape heuristics.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Analyzer;
use crate::extract::{ExtractedText, SectionKind};
use crate::models::{AnalyzerFinding, Category, Issue};

/// A line with inner runs of 3+ spaces usually came from side-by-side columns.
static COLUMN_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S\s{3,}\S").expect("column gap regex"));

const TABLE_PENALTY: f64 = 20.0;
const IMAGE_PENALTY: f64 = 15.0;
const MULTI_COLUMN_PENALTY: f64 = 20.0;
const GRID_PENALTY: f64 = 10.0;
const UNSEGMENTED_PENALTY: f64 = 25.0;

pub struct FormatAnalyzer;

impl Analyzer for FormatAnalyzer {
    fn category(&self) -> Category {
        Category::Format
    }

    fn name(&self) -> &'static str {
        "format"
    }

    fn analyze(&self, text: &ExtractedText) -> AnalyzerFinding {
        let mut score = 100.0;
        let mut issues = Vec::new();

        if text.metadata.has_tables {
            score -= TABLE_PENALTY;
            issues.push(
                Issue::new("Tables detected").with_detail(
                    "ATS parsers often scramble table content; replace tables with plain lines",
                ),
            );
        }

        if text.metadata.embedded_images > 0 {
            score -= IMAGE_PENALTY;
            issues.push(
                Issue::new(format!(
                    "{} embedded image(s) found",
                    text.metadata.embedded_images
                ))
                .with_detail("Text inside graphics is invisible to ATS software"),
            );
        }

        let lines: Vec<&str> = text.text.lines().filter(|l| !l.trim().is_empty()).collect();
        if !lines.is_empty() {
            let gapped = lines.iter().filter(|l| COLUMN_GAP.is_match(l)).count();
            if gapped >= 4 && gapped * 5 >= lines.len() {
                score -= MULTI_COLUMN_PENALTY;
                issues.push(
                    Issue::new("Possible multi-column layout").with_detail(
                        "Wide gaps inside many lines suggest columns; use a single-column layout",
                    ),
                );
            }

            let gridded = lines
                .iter()
                .filter(|l| l.matches('\t').count() >= 2 || l.matches('|').count() >= 2)
                .count();
            if gridded >= 3 {
                score -= GRID_PENALTY;
                issues.push(Issue::new("Tab- or pipe-separated columns detected"));
            }
        }

        let segmented = text
            .sections
            .iter()
            .any(|s| s.kind != SectionKind::Other);
        if !segmented {
            score -= UNSEGMENTED_PENALTY;
            issues.push(
                Issue::new("Text does not segment into standard resume sections").with_detail(
                    "Add clear headings such as Experience, Education, and Skills",
                ),
            );
        }

        let mut finding = AnalyzerFinding::new(Category::Format, score);
        finding.issues = issues;
        finding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionMetadata;

    fn plain(text: &str) -> ExtractedText {
        ExtractedText::from_plain(text)
    }

    #[test]
    fn clean_single_column_resume_scores_full() {
        let text = plain(
            "Jane Doe\n\nSummary\nEngineer.\n\nExperience\nBuilt an API.\n\nEducation\nBS.\n",
        );
        let finding = FormatAnalyzer.analyze(&text);
        assert_eq!(finding.score, 100.0);
        assert!(finding.issues.is_empty());
    }

    #[test]
    fn tables_and_images_from_metadata_are_penalized() {
        let metadata = ExtractionMetadata {
            has_tables: true,
            embedded_images: 2,
            ..Default::default()
        };
        let text = ExtractedText::new(
            "Experience\nDid things.\n\nEducation\nBS.\n".to_string(),
            metadata,
        );
        let finding = FormatAnalyzer.analyze(&text);
        assert_eq!(finding.score, 100.0 - TABLE_PENALTY - IMAGE_PENALTY);
        assert!(finding.issues.iter().any(|i| i.summary.contains("Tables")));
        assert!(finding
            .issues
            .iter()
            .any(|i| i.summary.contains("2 embedded image(s)")));
    }

    #[test]
    fn column_gaps_flag_multi_column_layout() {
        let text = plain(
            "Experience\n\
             Acme Corp        Senior Engineer\n\
             2019 to 2024     San Francisco\n\
             Led platform     Shipped v2\n\
             Grew team        Cut costs\n",
        );
        let finding = FormatAnalyzer.analyze(&text);
        assert!(finding
            .issues
            .iter()
            .any(|i| i.summary.contains("multi-column")));
        assert!(finding.score <= 80.0);
    }

    #[test]
    fn pipe_grids_are_penalized() {
        let text = plain(
            "Experience\n\
             | Role | Company | Years |\n\
             | Engineer | Acme | 4 |\n\
             | Analyst | Initech | 2 |\n",
        );
        let finding = FormatAnalyzer.analyze(&text);
        assert!(finding
            .issues
            .iter()
            .any(|i| i.summary.contains("pipe-separated")));
    }

    #[test]
    fn unsegmentable_text_is_flagged() {
        let text = plain("a wall of words\nwith nothing resembling\na heading anywhere\n");
        let finding = FormatAnalyzer.analyze(&text);
        assert!(finding
            .issues
            .iter()
            .any(|i| i.summary.contains("does not segment")));
        assert_eq!(finding.score, 100.0 - UNSEGMENTED_PENALTY);
    }
}
