//! Keyword analyzer: case-insensitive, stem-tolerant overlap between resume
//! tokens and either an uploaded job description or a generic industry
//! baseline. Missing terms are reported by name so recommendations can quote
//! them.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use super::Analyzer;
use crate::extract::ExtractedText;
use crate::models::{AnalyzerFinding, Category, Issue};

/// Terms an ATS baseline scan expects somewhere in a resume when no job
/// description is supplied.
const BASELINE_KEYWORDS: &[&str] = &[
    "managed",
    "led",
    "developed",
    "designed",
    "implemented",
    "delivered",
    "improved",
    "created",
    "analyzed",
    "coordinated",
    "launched",
    "optimized",
    "collaborated",
    "negotiated",
    "budget",
    "strategy",
    "leadership",
    "communication",
    "customer",
    "sales",
    "marketing",
    "data",
    "reporting",
    "stakeholders",
    "training",
    "operations",
    "project",
    "team",
    "process",
    "results",
];

/// Matching this many baseline terms earns a full keyword score.
const BASELINE_TARGET: usize = 12;
/// Most frequent job-description terms considered the target set.
const JD_TARGET_TERMS: usize = 20;
const MAX_NAMED_MISSING: usize = 10;

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9+#]+").expect("token regex"));

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in",
        "is", "it", "its", "of", "on", "or", "our", "that", "the", "their", "this", "to",
        "we", "will", "with", "you", "your", "who", "what", "they", "all", "any", "can",
        "into", "more", "other", "such", "than", "these", "through", "using", "well", "work",
        "working", "years", "plus", "must", "able", "strong", "experience", "required",
        "preferred", "including", "skills", "knowledge", "ability", "role", "candidate",
    ]
    .into_iter()
    .collect()
});

const SUFFIXES: &[&str] = &[
    "izations", "ization", "ations", "ments", "ation", "ingly", "ment", "ings", "ities",
    "ity", "ing", "edly", "ers", "ies", "ed", "es", "er", "s",
];

/// Light suffix-stripping stemmer: enough to treat manage/managed/management
/// as related without pulling in a full stemming library.
pub fn stem(word: &str) -> String {
    let mut stemmed = word.to_lowercase();
    // Strip to a fixpoint so plural derived forms ("processes" vs "process")
    // reduce to the same stem.
    loop {
        let before = stemmed.len();
        for suffix in SUFFIXES {
            if stemmed.len() > suffix.len() + 3 && stemmed.ends_with(suffix) {
                stemmed.truncate(stemmed.len() - suffix.len());
                break;
            }
        }
        if stemmed.len() == before {
            break;
        }
    }
    if stemmed.len() >= 5 && stemmed.ends_with('e') {
        stemmed.pop();
    }
    stemmed
}

pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub struct KeywordAnalyzer {
    job_description: Option<String>,
}

impl KeywordAnalyzer {
    pub fn new(job_description: Option<String>) -> Self {
        Self { job_description }
    }

    /// Target terms from a job description: stop-filtered tokens, deduplicated
    /// by stem, most frequent first (ties broken alphabetically for
    /// determinism).
    fn jd_targets(job_description: &str) -> Vec<String> {
        let mut by_stem: HashMap<String, (String, usize)> = HashMap::new();
        for token in tokenize(job_description) {
            if token.len() < 3 || STOPWORDS.contains(token.as_str()) {
                continue;
            }
            let entry = by_stem.entry(stem(&token)).or_insert((token, 0));
            entry.1 += 1;
        }
        let mut terms: Vec<(String, usize)> = by_stem.into_values().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        terms
            .into_iter()
            .take(JD_TARGET_TERMS)
            .map(|(token, _)| token)
            .collect()
    }
}

impl Analyzer for KeywordAnalyzer {
    fn category(&self) -> Category {
        Category::Keywords
    }

    fn name(&self) -> &'static str {
        "keywords"
    }

    fn analyze(&self, text: &ExtractedText) -> AnalyzerFinding {
        let resume_stems: HashSet<String> =
            tokenize(&text.text).iter().map(|t| stem(t)).collect();

        let targets: Vec<String> = match &self.job_description {
            Some(jd) => Self::jd_targets(jd),
            None => BASELINE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        };

        let (matched, missing): (Vec<&String>, Vec<&String>) = targets
            .iter()
            .partition(|term| resume_stems.contains(&stem(term)));

        let score = if self.job_description.is_some() {
            if targets.is_empty() {
                100.0
            } else {
                matched.len() as f64 / targets.len() as f64 * 100.0
            }
        } else {
            (matched.len().min(BASELINE_TARGET) as f64 / BASELINE_TARGET as f64) * 100.0
        };

        let mut finding = AnalyzerFinding::new(Category::Keywords, score);
        if !missing.is_empty() {
            let named: Vec<&str> = missing
                .iter()
                .take(MAX_NAMED_MISSING)
                .map(|s| s.as_str())
                .collect();
            let detail = if self.job_description.is_some() {
                "These terms appear in the job description but not in your resume"
            } else {
                "Common industry terms ATS scans look for were not found"
            };
            finding = finding.with_issue(
                Issue::new(format!("Missing keywords: {}", named.join(", ")))
                    .with_detail(detail),
            );
        }
        finding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stemming_relates_word_forms() {
        assert_eq!(stem("manage"), stem("managed"));
        assert_eq!(stem("manage"), stem("management"));
        assert_eq!(stem("develop"), stem("developing"));
        assert_eq!(stem("develop"), stem("development"));
        assert_ne!(stem("marketing"), stem("education"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let text = ExtractedText::from_plain("MANAGED budgets and LED the Sales team");
        let finding = KeywordAnalyzer::new(None).analyze(&text);
        assert!(finding.score > 0.0);
    }

    #[test]
    fn jd_scoring_reports_missing_terms_by_name() {
        let jd = "We need Python and SQL. Python experience is essential. \
                  SQL and Python used daily alongside Kubernetes."
            .to_string();
        let text = ExtractedText::from_plain("Wrote Python services for data pipelines.");
        let finding = KeywordAnalyzer::new(Some(jd)).analyze(&text);

        assert!(finding.score < 100.0);
        let missing = &finding.issues[0].summary;
        assert!(missing.starts_with("Missing keywords:"), "{}", missing);
        assert!(missing.contains("sql"));
        assert!(missing.contains("kubernetes"));
        assert!(!missing.contains("python"));
    }

    #[test]
    fn full_jd_coverage_scores_100() {
        let jd = "Python SQL Kubernetes".to_string();
        let text =
            ExtractedText::from_plain("Python, SQL and Kubernetes are my daily tools.");
        let finding = KeywordAnalyzer::new(Some(jd)).analyze(&text);
        assert_eq!(finding.score, 100.0);
        assert!(finding.issues.is_empty());
    }

    #[test]
    fn baseline_needs_twelve_matches_for_full_score() {
        let text = ExtractedText::from_plain(
            "Managed and led a team. Developed, designed and implemented a strategy. \
             Delivered results, improved processes, created reporting, analyzed data, \
             coordinated operations.",
        );
        let finding = KeywordAnalyzer::new(None).analyze(&text);
        assert_eq!(finding.score, 100.0);

        let sparse = ExtractedText::from_plain("I did some things at a job once.");
        let finding = KeywordAnalyzer::new(None).analyze(&sparse);
        assert!(finding.score < 25.0);
        assert!(finding.issues[0].summary.starts_with("Missing keywords:"));
    }

    #[test]
    fn deterministic_across_runs() {
        let jd = Some("Rust engineer building Rust services with Kafka and Postgres".to_string());
        let text = ExtractedText::from_plain("Built services with Postgres and a queue.");
        let a = KeywordAnalyzer::new(jd.clone()).analyze(&text);
        let b = KeywordAnalyzer::new(jd).analyze(&text);
        assert_eq!(a.score, b.score);
        assert_eq!(a.issues, b.issues);
    }
}
