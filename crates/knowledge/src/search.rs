//! Lexical relevance scoring over the FAQ corpus.
//!
//! Scoring is keyword based and deterministic:
//! - +1 per question token found anywhere in the entry text (question, answer, tags)
//! - +2 more per question token found in the entry's own question
//! - +1.5 per entry tag found in the raw question
//!
//! Tokens are whitespace-separated, lowercased, and longer than two characters.
//! Repeated tokens count once per occurrence.

use crate::types::{FaqEntry, ScoredFaq};
use std::cmp::Ordering;

/// Tokens with this many characters or fewer are ignored.
const MAX_IGNORED_TOKEN_CHARS: usize = 2;

const TEXT_MATCH_WEIGHT: f64 = 1.0;
const QUESTION_MATCH_WEIGHT: f64 = 2.0;
const TAG_MATCH_WEIGHT: f64 = 1.5;

/// Rank `faqs` against `question` and keep the best `top_n` with a positive score.
///
/// Ties keep corpus order. The result is never longer than `top_n`.
pub fn retrieve_relevant(question: &str, faqs: &[FaqEntry], top_n: usize) -> Vec<ScoredFaq> {
    let question_lower = question.to_lowercase();
    let tokens = tokenize(&question_lower);

    let mut ranked: Vec<(usize, f64)> = faqs
        .iter()
        .enumerate()
        .map(|(i, faq)| (i, score_entry(faq, &question_lower, &tokens)))
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let results: Vec<ScoredFaq> = ranked
        .into_iter()
        .take(top_n)
        .filter(|(_, score)| *score > 0.0)
        .map(|(i, score)| ScoredFaq::new(faqs[i].clone(), score))
        .collect();

    tracing::debug!(
        "Scored {} FAQ entries against {} tokens, kept {}",
        faqs.len(),
        tokens.len(),
        results.len()
    );

    results
}

/// Split a lowercased question into scoring tokens.
fn tokenize(question_lower: &str) -> Vec<&str> {
    question_lower
        .split_whitespace()
        .filter(|word| word.chars().count() > MAX_IGNORED_TOKEN_CHARS)
        .collect()
}

/// Score one entry. `question_lower` is the whole lowercased question.
fn score_entry(faq: &FaqEntry, question_lower: &str, tokens: &[&str]) -> f64 {
    let haystack = format!("{} {} {}", faq.question, faq.answer, faq.tags.join(" ")).to_lowercase();
    let faq_question = faq.question.to_lowercase();

    let mut score = 0.0;

    for token in tokens {
        if haystack.contains(token) {
            score += TEXT_MATCH_WEIGHT;
        }
    }

    for token in tokens {
        if faq_question.contains(token) {
            score += QUESTION_MATCH_WEIGHT;
        }
    }

    for tag in &faq.tags {
        if question_lower.contains(&tag.to_lowercase()) {
            score += TAG_MATCH_WEIGHT;
        }
    }

    score
}
