//! Lexical similarity scoring.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Scores two texts in `[0, 1]`; symmetric and deterministic.
pub trait TextSimilarity {
    fn similarity(&self, first: &str, second: &str) -> f64;
}

/// Sørensen–Dice coefficient over character bigrams, whitespace ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceCoefficient;

impl TextSimilarity for DiceCoefficient {
    fn similarity(&self, first: &str, second: &str) -> f64 {
        let first: Vec<char> = WHITESPACE_RE.replace_all(first, "").chars().collect();
        let second: Vec<char> = WHITESPACE_RE.replace_all(second, "").chars().collect();

        if first == second {
            return 1.0;
        }
        if first.len() < 2 || second.len() < 2 {
            return 0.0;
        }

        let mut first_bigrams: HashMap<(char, char), usize> = HashMap::new();
        for pair in first.windows(2) {
            *first_bigrams.entry((pair[0], pair[1])).or_default() += 1;
        }

        let mut intersection = 0usize;
        for pair in second.windows(2) {
            if let Some(count) = first_bigrams.get_mut(&(pair[0], pair[1])) {
                if *count > 0 {
                    *count -= 1;
                    intersection += 1;
                }
            }
        }

        (2 * intersection) as f64 / (first.len() + second.len() - 2) as f64
    }
}

impl<F> TextSimilarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn similarity(&self, first: &str, second: &str) -> f64 {
        self(first, second)
    }
}
