//! Section segmentation: maps line offsets of the extracted text to logical
//! resume sections by fuzzy-matching heading lines against known synonyms.

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

/// Similarity at which a short line is accepted as a section heading.
const HEADING_SIMILARITY: f64 = 0.84;
const MAX_HEADING_LEN: usize = 48;
const MAX_HEADING_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Contact,
    Other,
}

impl SectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Contact => "Contact",
            SectionKind::Other => "General",
        }
    }
}

/// Byte range of one detected section within the extracted text. The range
/// includes the heading line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    pub kind: SectionKind,
    pub heading: String,
    pub start: usize,
    pub end: usize,
}

const SUMMARY_SYNONYMS: &[&str] = &[
    "summary",
    "professional summary",
    "profile",
    "objective",
    "career objective",
    "about me",
];

const EXPERIENCE_SYNONYMS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment history",
    "work history",
    "career history",
    "relevant experience",
];

const EDUCATION_SYNONYMS: &[&str] = &[
    "education",
    "academic background",
    "academics",
    "qualifications",
    "education and training",
];

const SKILLS_SYNONYMS: &[&str] = &[
    "skills",
    "technical skills",
    "core competencies",
    "key skills",
    "expertise",
    "technologies",
    "skills and expertise",
];

const CONTACT_SYNONYMS: &[&str] = &["contact", "contact information", "contact details"];

/// Classify a single line as a section heading, returning the kind and the
/// best similarity achieved. Conservative: long lines and sentences never
/// qualify.
pub fn classify_heading(line: &str) -> Option<(SectionKind, f64)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_HEADING_LEN || trimmed.ends_with('.') {
        return None;
    }
    let normalized = normalize_heading(trimmed);
    if normalized.is_empty() || normalized.split_whitespace().count() > MAX_HEADING_WORDS {
        return None;
    }

    let candidates: [(SectionKind, &[&str]); 5] = [
        (SectionKind::Summary, SUMMARY_SYNONYMS),
        (SectionKind::Experience, EXPERIENCE_SYNONYMS),
        (SectionKind::Education, EDUCATION_SYNONYMS),
        (SectionKind::Skills, SKILLS_SYNONYMS),
        (SectionKind::Contact, CONTACT_SYNONYMS),
    ];

    let mut best: Option<(SectionKind, f64)> = None;
    for (kind, synonyms) in candidates {
        for synonym in synonyms {
            let similarity = normalized_levenshtein(&normalized, synonym);
            if similarity >= HEADING_SIMILARITY
                && best.map(|(_, s)| similarity > s).unwrap_or(true)
            {
                best = Some((kind, similarity));
            }
        }
    }
    best
}

fn normalize_heading(line: &str) -> String {
    line.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
        .replace('&', "and")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split extracted text into section spans. Text before the first recognized
/// heading becomes an `Other` span.
pub fn segment(text: &str) -> Vec<SectionSpan> {
    let mut spans: Vec<SectionSpan> = Vec::new();
    let mut current_start = 0usize;
    let mut current_kind = SectionKind::Other;
    let mut current_heading = String::new();
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if let Some((kind, _)) = classify_heading(line) {
            if line_start > current_start {
                spans.push(SectionSpan {
                    kind: current_kind,
                    heading: current_heading.clone(),
                    start: current_start,
                    end: line_start,
                });
            }
            current_start = line_start;
            current_kind = kind;
            current_heading = line.trim().trim_end_matches(':').to_string();
        }
    }

    if offset > current_start || spans.is_empty() {
        spans.push(SectionSpan {
            kind: current_kind,
            heading: current_heading,
            start: current_start,
            end: offset,
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_headings_classify_exactly() {
        assert_eq!(
            classify_heading("Experience").map(|(k, _)| k),
            Some(SectionKind::Experience)
        );
        assert_eq!(
            classify_heading("EDUCATION").map(|(k, _)| k),
            Some(SectionKind::Education)
        );
        assert_eq!(
            classify_heading("Skills:").map(|(k, _)| k),
            Some(SectionKind::Skills)
        );
        assert_eq!(
            classify_heading("Professional Summary").map(|(k, _)| k),
            Some(SectionKind::Summary)
        );
    }

    #[test]
    fn near_miss_headings_classify_fuzzily() {
        // One typo away from "work experience".
        assert_eq!(
            classify_heading("Work Experiance").map(|(k, _)| k),
            Some(SectionKind::Experience)
        );
    }

    #[test]
    fn sentences_are_not_headings() {
        assert_eq!(classify_heading("I have ten years of experience."), None);
        assert_eq!(
            classify_heading("Led the experience design team across four product lines"),
            None
        );
        assert_eq!(classify_heading(""), None);
    }

    #[test]
    fn segment_splits_on_headings() {
        let text = "Jane Doe\njane@example.com\n\nExperience\nDid things.\n\nEducation\nBS.\n";
        let spans = segment(text);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].kind, SectionKind::Other);
        assert_eq!(spans[1].kind, SectionKind::Experience);
        assert_eq!(spans[1].heading, "Experience");
        assert_eq!(spans[2].kind, SectionKind::Education);
        // Spans tile the text.
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[2].end, text.len());
        assert_eq!(spans[0].end, spans[1].start);
        assert_eq!(spans[1].end, spans[2].start);
    }

    #[test]
    fn headingless_text_is_one_other_span() {
        let text = "just a blob of text\nwith no structure at all\n";
        let spans = segment(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, SectionKind::Other);
        assert_eq!(spans[0].end, text.len());
    }
}
