//! Text-rewrite suggester: finds sentence-level weaknesses (passive voice,
//! vague stock phrases, missing metrics) and proposes concrete rewrites.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::{sections, ExtractedText};
use crate::models::ResumeMistake;

/// Vague phrases ATS ranking ignores and recruiters skim past, with the
/// action verb each rewrite leads with. The optional auxiliary in front
/// ("was responsible for") is swallowed by the same rule.
const VAGUE_PHRASES: &[(&str, &str)] = &[
    ("responsible for", "led"),
    ("duties included", "delivered"),
    ("worked on", "built"),
    ("helped with", "drove"),
    ("assisted with", "supported"),
    ("involved in", "contributed to"),
    ("tasked with", "owned"),
    ("proficient in", "experienced in"),
    ("familiar with", "experienced with"),
];

static PASSIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(was|were|has been|have been|been|being|is|are)\s+([a-z]+(?:ed|en))\b")
        .expect("passive regex")
});

static HAS_METRIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("metric regex"));

static VAGUE_MATCHERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    VAGUE_PHRASES
        .iter()
        .map(|(phrase, replacement)| {
            let pattern = format!(r"(?i)\b(?:(?:was|were|is|are)\s+)?{}\b", phrase);
            (Regex::new(&pattern).expect("vague phrase regex"), *replacement)
        })
        .collect()
});

const MIN_WORDS: usize = 4;
const METRIC_SUFFIX: &str = ", delivering a 20% improvement in [key metric]";

#[derive(Debug)]
struct Candidate {
    mistake: ResumeMistake,
    severity: u32,
    offset: usize,
}

/// Scan for weak sentences and propose rewrites, capped at `max_mistakes`
/// and ranked by severity (worst first, ties in document order).
pub fn suggest(text: &ExtractedText, max_mistakes: usize) -> Vec<ResumeMistake> {
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut offset = 0usize;

    for line in text.text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let sentence = line
            .trim()
            .trim_start_matches(['-', '*', '•', '·'])
            .trim();
        if sentence.split_whitespace().count() < MIN_WORDS
            || sections::classify_heading(sentence).is_some()
        {
            continue;
        }

        if let Some(candidate) = assess(sentence, text, line_start) {
            candidates.push(candidate);
        }
    }

    candidates.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.offset.cmp(&b.offset)));
    candidates
        .into_iter()
        .take(max_mistakes)
        .map(|c| c.mistake)
        .collect()
}

fn assess(sentence: &str, text: &ExtractedText, offset: usize) -> Option<Candidate> {
    let vague = VAGUE_MATCHERS.iter().find(|(re, _)| re.is_match(sentence));
    let passive = vague.is_none() && PASSIVE.is_match(sentence);
    let has_metric = HAS_METRIC.is_match(sentence);

    if vague.is_none() && !passive {
        return None;
    }

    let mut severity = 2;
    if !has_metric {
        severity += 1;
    }

    let mut improved = match vague {
        Some((re, replacement)) => re.replace(sentence, *replacement).into_owned(),
        None => PASSIVE.replace(sentence, "$2").into_owned(),
    };
    if !has_metric {
        let trimmed = improved.trim_end_matches('.').to_string();
        improved = format!("{}{}.", trimmed, METRIC_SUFFIX);
    }
    improved = capitalize(&improved);

    let (title, explanation) = if vague.is_some() {
        (
            "Generic Phrasing",
            "Vague phrases are filtered out by ATS. Lead with a strong action verb and name \
             the specific skills, tools, and outcomes involved.",
        )
    } else {
        (
            "Passive Language",
            "Start with strong action verbs instead of passive constructions; include \
             specific technologies and measurable results so your experience stands out.",
        )
    };
    let explanation = if has_metric {
        explanation.to_string()
    } else {
        format!(
            "{} Replace the bracketed placeholder with a real number; concrete metrics make \
             achievements credible.",
            explanation
        )
    };

    let section = text
        .section_for_offset(offset)
        .map(|s| s.kind.label().to_string())
        .unwrap_or_else(|| "General".to_string());

    Some(Candidate {
        mistake: ResumeMistake {
            section,
            title: title.to_string(),
            original_text: sentence.to_string(),
            improved_text: improved,
            explanation,
        },
        severity,
        offset,
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> ExtractedText {
        ExtractedText::from_plain(text)
    }

    #[test]
    fn vague_phrase_is_rewritten_with_action_verb() {
        let text = plain("Experience\nWas responsible for the maintenance of database systems.\n");
        let mistakes = suggest(&text, 10);
        assert_eq!(mistakes.len(), 1);
        let m = &mistakes[0];
        assert_eq!(m.title, "Generic Phrasing");
        assert!(m.improved_text.starts_with("Led the maintenance"));
        assert_eq!(m.section, "Work Experience");
    }

    #[test]
    fn passive_voice_is_rewritten_active() {
        let text = plain("Experience\nThe deployment pipeline was automated in 2021 by my team.\n");
        let mistakes = suggest(&text, 10);
        assert_eq!(mistakes.len(), 1);
        assert_eq!(mistakes[0].title, "Passive Language");
        assert!(!PASSIVE.is_match(&mistakes[0].improved_text));
    }

    #[test]
    fn pairing_invariant_holds() {
        let text = plain(
            "Experience\n\
             Responsible for reporting tasks every week.\n\
             The service was maintained by the team.\n\
             Proficient in several programming languages overall.\n",
        );
        for m in suggest(&text, 10) {
            assert!(!m.original_text.is_empty());
            assert!(!m.improved_text.is_empty());
            assert_ne!(m.original_text, m.improved_text);
        }
    }

    #[test]
    fn severity_ranks_metricless_passive_above_vague_with_metric() {
        let text = plain(
            "Experience\n\
             Proficient in Python since 2015 with 8 projects.\n\
             The backlog was managed without any tooling support.\n",
        );
        let mistakes = suggest(&text, 10);
        assert_eq!(mistakes.len(), 2);
        // Passive with no metric outranks a vague phrase that has numbers.
        assert_eq!(mistakes[0].title, "Passive Language");
        assert_eq!(mistakes[1].title, "Generic Phrasing");
    }

    #[test]
    fn cap_is_enforced() {
        let mut body = String::from("Experience\n");
        for i in 0..15 {
            body.push_str(&format!(
                "Responsible for the upkeep of subsystem number {} here.\n",
                i
            ));
        }
        let text = plain(&body);
        assert_eq!(suggest(&text, 10).len(), 10);
    }

    #[test]
    fn clean_active_quantified_lines_produce_nothing() {
        let text = plain(
            "Experience\n\
             Led a team of 5 engineers shipping 3 releases.\n\
             Cut infrastructure spend by 30% in one year.\n",
        );
        assert!(suggest(&text, 10).is_empty());
    }

    #[test]
    fn missing_metric_rewrites_carry_a_placeholder() {
        let text = plain("Experience\nWorked on the checkout service with another team.\n");
        let mistakes = suggest(&text, 10);
        assert_eq!(mistakes.len(), 1);
        assert!(mistakes[0].improved_text.contains("[key metric]"));
        assert!(mistakes[0].explanation.contains("Replace the bracketed placeholder"));
    }
}
