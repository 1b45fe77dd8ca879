//! Deterministic score aggregation: weighted average of analyzer sub-scores,
//! plus the derived pass-likelihood and feedback band.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{AnalyzerFinding, Category, CategoryScore};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Per-category aggregation weights. Must sum to 1.0; validated at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub format: f64,
    pub keywords: f64,
    pub structure: f64,
    pub content: f64,
    pub contact: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            format: 0.25,
            keywords: 0.30,
            structure: 0.20,
            content: 0.20,
            contact: 0.05,
        }
    }
}

impl ScoreWeights {
    pub fn weight_for(&self, category: Category) -> f64 {
        match category {
            Category::Format => self.format,
            Category::Keywords => self.keywords,
            Category::Structure => self.structure,
            Category::Content => self.content,
            Category::Contact => self.contact,
        }
    }

    pub fn sum(&self) -> f64 {
        self.format + self.keywords + self.structure + self.content + self.contact
    }

    pub fn validate(&self) -> AppResult<()> {
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AppError::InvalidWeightConfiguration { sum });
        }
        for category in Category::ALL {
            if self.weight_for(category) < 0.0 {
                return Err(AppError::InvalidWeightConfiguration { sum });
            }
        }
        Ok(())
    }
}

/// Combine per-analyzer sub-scores into the rounded overall score and the
/// unrounded per-category breakdown, ordered by category.
pub fn aggregate(findings: &[AnalyzerFinding], weights: &ScoreWeights) -> (u8, Vec<CategoryScore>) {
    let mut breakdown = Vec::with_capacity(Category::ALL.len());
    let mut weighted = 0.0;

    for category in Category::ALL {
        let weight = weights.weight_for(category);
        let score = findings
            .iter()
            .find(|f| f.category == category)
            .map(|f| f.score)
            .unwrap_or(0.0);
        weighted += weight * score;
        breakdown.push(CategoryScore {
            category,
            score,
            weight,
        });
    }

    let overall = weighted.round().clamp(0.0, 100.0) as u8;
    (overall, breakdown)
}

/// Likelihood (percentage) that a resume with this score clears an ATS
/// pre-filter. Monotonic in the overall score.
pub fn pass_likelihood(overall_score: u8) -> u8 {
    let raw = (0.65 * overall_score as f64 + 30.0).round();
    raw.clamp(5.0, 95.0) as u8
}

/// Free-text summary for the score band.
pub fn feedback(overall_score: u8) -> &'static str {
    if overall_score < 60 {
        "Your resume needs significant improvements to be ATS-compatible. Focus on addressing the critical issues highlighted."
    } else if overall_score < 70 {
        "Your resume has several ATS compatibility issues that should be addressed for better results."
    } else if overall_score < 80 {
        "Your resume is fairly ATS-compatible but could benefit from some targeted improvements."
    } else {
        "Your resume is well-optimized for ATS systems. Only minor tweaks are needed for perfection."
    }
}
