//! Content analyzer: quantifiable impact in experience bullets. Bullets with
//! no numbers, percentages, or currency read as unverifiable claims to both
//! ATS ranking and recruiters.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Analyzer;
use crate::extract::{ExtractedText, SectionKind};
use crate::models::{AnalyzerFinding, Category, Issue};

static METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(\.\d+)?\s*%)|(\$\s*\d)|(\b\d+(,\d{3})*(\.\d+)?\b)|(\bpercent\b)")
        .expect("metric regex")
});

const BULLET_MARKERS: &[char] = &['-', '*', '•', '·', '‣', '▪'];
/// Score given when no experience bullets can be identified at all.
const NO_BULLETS_SCORE: f64 = 40.0;
const MAX_EXAMPLES: usize = 2;

pub struct ContentAnalyzer;

impl ContentAnalyzer {
    fn bullets<'a>(text: &'a ExtractedText) -> Vec<&'a str> {
        let scope = text
            .section_text(SectionKind::Experience)
            .unwrap_or(&text.text);

        let marked: Vec<&str> = scope
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with(BULLET_MARKERS))
            .map(|l| l.trim_start_matches(BULLET_MARKERS).trim())
            .filter(|l| !l.is_empty())
            .collect();
        if !marked.is_empty() {
            return marked;
        }

        // No bullet markers: fall back to sentence-like lines in the
        // experience section.
        text.section_text(SectionKind::Experience)
            .map(|body| {
                body.lines()
                    .map(str::trim)
                    .filter(|l| l.split_whitespace().count() >= 6)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Analyzer for ContentAnalyzer {
    fn category(&self) -> Category {
        Category::Content
    }

    fn name(&self) -> &'static str {
        "content"
    }

    fn analyze(&self, text: &ExtractedText) -> AnalyzerFinding {
        let bullets = Self::bullets(text);

        if bullets.is_empty() {
            return AnalyzerFinding::new(Category::Content, NO_BULLETS_SCORE).with_issue(
                Issue::new("No experience bullet points found").with_detail(
                    "Describe each role as bullet points with concrete, measurable outcomes",
                ),
            );
        }

        let quantified = bullets.iter().filter(|b| METRIC.is_match(b)).count();
        let score = quantified as f64 / bullets.len() as f64 * 100.0;

        let mut finding = AnalyzerFinding::new(Category::Content, score);
        let unquantified = bullets.len() - quantified;
        if unquantified > 0 {
            let examples: Vec<String> = bullets
                .iter()
                .filter(|b| !METRIC.is_match(b))
                .take(MAX_EXAMPLES)
                .map(|b| truncate(b, 70))
                .collect();
            finding = finding.with_issue(
                Issue::new(format!(
                    "{} of {} experience bullets lack measurable results",
                    unquantified,
                    bullets.len()
                ))
                .with_detail(format!("For example: \"{}\"", examples.join("\"; \""))),
            );
        }
        finding
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fully_quantified_bullets_score_full() {
        let text = ExtractedText::from_plain(
            "Experience\n\
             - Increased sales by 20% across 3 regions\n\
             - Cut costs by $40,000 per year\n\
             - Led a team of 5 engineers\n",
        );
        let finding = ContentAnalyzer.analyze(&text);
        assert_eq!(finding.score, 100.0);
        assert!(finding.issues.is_empty());
    }

    #[test]
    fn qualitative_bullets_are_penalized_with_examples() {
        let text = ExtractedText::from_plain(
            "Experience\n\
             - Increased sales by 20%\n\
             - Responsible for various reporting duties\n\
             - Worked closely with stakeholders\n\
             - Helped improve team morale\n",
        );
        let finding = ContentAnalyzer.analyze(&text);
        assert_eq!(finding.score, 25.0);
        assert!(finding.issues[0]
            .summary
            .contains("3 of 4 experience bullets"));
        assert!(finding.issues[0]
            .detail
            .as_deref()
            .unwrap()
            .contains("Responsible for various reporting duties"));
    }

    #[test]
    fn no_bullets_gets_floor_score() {
        let text = ExtractedText::from_plain("Summary\nAn engineer.\n");
        let finding = ContentAnalyzer.analyze(&text);
        assert_eq!(finding.score, NO_BULLETS_SCORE);
        assert!(finding.issues[0].summary.contains("No experience bullet"));
    }

    #[test]
    fn unmarked_experience_lines_are_counted() {
        let text = ExtractedText::from_plain(
            "Experience\n\
             Maintained the data warehouse and its nightly load jobs\n\
             Reduced query latency by 45% over two quarters\n",
        );
        let finding = ContentAnalyzer.analyze(&text);
        assert_eq!(finding.score, 50.0);
    }
}
