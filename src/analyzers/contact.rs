//! Contact analyzer: name, email, and phone presence plus basic formatting,
//! with a minor flag for over-disclosure (full street address).

use once_cell::sync::Lazy;
use regex::Regex;

use super::Analyzer;
use crate::extract::ExtractedText;
use crate::models::{AnalyzerFinding, Category, Issue};

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email regex")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}").expect("phone regex")
});

static STREET_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d{1,5}\s+[A-Za-z][A-Za-z ]{1,30}\s(Street|St|Avenue|Ave|Road|Rd|Lane|Ln|Drive|Dr|Boulevard|Blvd|Court|Ct)\b",
    )
    .expect("address regex")
});

const NAME_POINTS: f64 = 30.0;
const EMAIL_POINTS: f64 = 40.0;
const PHONE_POINTS: f64 = 30.0;
const ADDRESS_PENALTY: f64 = 5.0;
/// How many leading lines are searched for the candidate's name.
const NAME_SEARCH_LINES: usize = 5;

pub struct ContactAnalyzer;

fn looks_like_name(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.len() > 40 || trimmed.contains('@') || trimmed.chars().any(|c| c.is_ascii_digit())
    {
        return false;
    }
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words
            .iter()
            .all(|w| w.chars().next().map(char::is_uppercase).unwrap_or(false))
}

impl Analyzer for ContactAnalyzer {
    fn category(&self) -> Category {
        Category::Contact
    }

    fn name(&self) -> &'static str {
        "contact"
    }

    fn analyze(&self, text: &ExtractedText) -> AnalyzerFinding {
        let mut score = 0.0;
        let mut issues = Vec::new();

        let has_name = text
            .text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(NAME_SEARCH_LINES)
            .any(looks_like_name);
        if has_name {
            score += NAME_POINTS;
        } else {
            issues.push(
                Issue::new("Name not clearly present at the top")
                    .with_detail("Put your full name on its own line at the top of the resume"),
            );
        }

        if EMAIL.is_match(&text.text) {
            score += EMAIL_POINTS;
        } else {
            issues.push(
                Issue::new("No email address found")
                    .with_detail("Add a professional email address near the top"),
            );
        }

        if PHONE.is_match(&text.text) {
            score += PHONE_POINTS;
        } else {
            issues.push(Issue::new("No phone number found"));
        }

        if STREET_ADDRESS.is_match(&text.text) {
            score -= ADDRESS_PENALTY;
            issues.push(
                Issue::new("Full street address found").with_detail(
                    "City and state are enough; a full address over-discloses personal data",
                ),
            );
        }

        let mut finding = AnalyzerFinding::new(Category::Contact, score);
        finding.issues = issues;
        finding
    }
}
