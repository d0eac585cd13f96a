//! Heuristic ATS scoring — five independent sub-scores combined by a fixed
//! weight vector into a 0–100 score.
//!
//! Every function here is pure and total: any string input, including the
//! empty string, produces a well-formed `ScoreReport`. Detected headers and
//! matched keywords ride along verbatim so callers can show the user *why*
//! the score is what it is, not just the number.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::resume::taxonomy::KeywordTaxonomy;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+").expect("valid regex")
});

// Permissive phone shape: optional +, 7–15 digits, single spaces or hyphens
// tolerated between digits. Anything shorter (ZIP codes) stays below the
// digit floor and does not match.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d(?:[ -]?\d){6,14}").expect("valid regex"));

static BULLET_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[-•*]\s").expect("valid regex"));

/// Section labels treated as structural-quality signals, matched
/// case-insensitively anywhere in the text.
const HEADER_VOCABULARY: &[&str] = &[
    "experience",
    "education",
    "skills",
    "projects",
    "summary",
    "objective",
    "certifications",
    "internship",
    "contact",
    "achievements",
    "work experience",
];

/// Full credit once this many distinct headers are present.
const HEADER_TARGET: usize = 3;

const WORDS_MIN: usize = 300;
const WORDS_MAX: usize = 900;

const FORMATTING_MIN_LINES: usize = 8;
const FORMATTING_MAX_AVG_LINE_LEN: f64 = 120.0;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Component weights for the combined score. Fixed configuration — constant
/// for the process lifetime. The combined score is clamped regardless, so
/// no sum-to-one invariant is enforced.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreWeights {
    pub has_contact: f64,
    pub has_section_headers: f64,
    pub length_ok: f64,
    pub keywords_match: f64,
    pub formatting: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            has_contact: 0.15,
            has_section_headers: 0.20,
            length_ok: 0.10,
            keywords_match: 0.35,
            formatting: 0.20,
        }
    }
}

/// Per-component sub-scores, each in [0, 1], rounded to three decimals.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreComponents {
    pub has_contact: f64,
    pub section_headers: f64,
    pub length_ok: f64,
    pub formatting: f64,
    pub keywords_match: f64,
}

/// The externally visible scoring contract. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    /// Weighted combination in [0, 100], rounded to one decimal.
    pub score_percent: f64,
    pub components: ScoreComponents,
    /// Taxonomy keywords found in the text, in taxonomy order and casing.
    pub matched_keywords: Vec<String>,
    /// Header terms found in the text, ordered by first occurrence.
    pub detected_headers: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sub-scores
// ────────────────────────────────────────────────────────────────────────────

/// True when the text carries an email-shaped or phone-shaped token.
fn has_contact_info(text: &str) -> bool {
    if EMAIL_RE.is_match(text) {
        return true;
    }
    PHONE_RE.find_iter(text).any(|m| {
        let digits = m.as_str().chars().filter(|c| c.is_ascii_digit()).count();
        if !(7..=15).contains(&digits) {
            return false;
        }
        // A candidate flanked by further digits is a fragment of a longer
        // run (card or ID numbers), not a phone number.
        let digit_before = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());
        let digit_after = text[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
        !digit_before && !digit_after
    })
}

/// Header terms present in the text, de-duplicated, ordered by first
/// occurrence. "work experience" and "experience" are distinct terms and may
/// both appear.
fn detect_section_headers(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<(usize, &str)> = HEADER_VOCABULARY
        .iter()
        .filter_map(|term| lower.find(term).map(|pos| (pos, *term)))
        .collect();
    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, term)| term.to_string()).collect()
}

/// 1.0 within the preferred word band; linear ramp below it, slow linear
/// decay above it.
fn length_ok_score(text: &str) -> f64 {
    let words = text.split_whitespace().count();
    if (WORDS_MIN..=WORDS_MAX).contains(&words) {
        return 1.0;
    }
    if words < WORDS_MIN {
        return words as f64 / WORDS_MIN as f64;
    }
    (1.0 - (words - WORDS_MAX) as f64 / 2000.0).max(0.0)
}

/// 0.6 for bulleted lines, plus 0.4 for many reasonably short lines (i.e.
/// not one dense paragraph), capped at 1.0.
fn formatting_score(text: &str) -> f64 {
    let mut score: f64 = 0.0;
    if BULLET_LINE_RE.is_match(text) {
        score += 0.6;
    }
    let line_count = text.lines().count();
    if line_count >= FORMATTING_MIN_LINES {
        let avg_line_len = text.chars().count() as f64 / line_count as f64;
        if avg_line_len < FORMATTING_MAX_AVG_LINE_LEN {
            score += 0.4;
        }
    }
    score.min(1.0)
}

/// Fraction of the expected keywords found in the text (case-insensitive
/// substring match), plus the matched keywords themselves. An unknown job
/// title scores 0.0 with no matches — never an error.
fn keywords_match_score(
    text: &str,
    job_title: &str,
    taxonomy: &KeywordTaxonomy,
) -> (f64, Vec<String>) {
    let expected = taxonomy.keywords_for(job_title);
    if expected.is_empty() {
        return (0.0, Vec::new());
    }

    let text_lower = text.to_lowercase();
    let matched: Vec<String> = expected
        .iter()
        .filter(|kw| text_lower.contains(&kw.to_lowercase()))
        .cloned()
        .collect();

    (matched.len() as f64 / expected.len() as f64, matched)
}

// ────────────────────────────────────────────────────────────────────────────
// Combined score
// ────────────────────────────────────────────────────────────────────────────

/// Scores a normalized resume against a target job title.
pub fn compute_ats_score(
    text: &str,
    job_title: &str,
    taxonomy: &KeywordTaxonomy,
    weights: &ScoreWeights,
) -> ScoreReport {
    let c_contact = if has_contact_info(text) { 1.0 } else { 0.0 };
    let headers = detect_section_headers(text);
    let c_headers = (headers.len() as f64 / HEADER_TARGET as f64).min(1.0);
    let c_len = length_ok_score(text);
    let c_format = formatting_score(text);
    let (c_kw, matched) = keywords_match_score(text, job_title, taxonomy);

    let combined = weights.has_contact * c_contact
        + weights.has_section_headers * c_headers
        + weights.length_ok * c_len
        + weights.formatting * c_format
        + weights.keywords_match * c_kw;

    ScoreReport {
        score_percent: round1(combined.clamp(0.0, 1.0) * 100.0),
        components: ScoreComponents {
            has_contact: c_contact,
            section_headers: round3(c_headers),
            length_ok: round3(c_len),
            formatting: round3(c_format),
            keywords_match: round3(c_kw),
        },
        matched_keywords: matched,
        detected_headers: headers,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
