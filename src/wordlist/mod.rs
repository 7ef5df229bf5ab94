//! Word list loading and candidate pre-filtering
//!
//! Reads the raw dictionary, drops words that cannot be part of an anagram of
//! the target phrase, and orders the rest so that words most likely to be in
//! the answer are explored first.

use crate::error::ConfigError;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Read a word list with one word per line.
///
/// Trailing whitespace is trimmed, blank lines are skipped and duplicates are
/// removed, keeping the first occurrence.
pub fn read_wordlist(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!("cannot read word list {}: {}", path.display(), e))
    })?;
    let words = parse_wordlist(&contents);
    debug!("read {} unique words from {}", words.len(), path.display());
    Ok(words)
}

/// Split word list text into unique, non-empty words.
pub fn parse_wordlist(contents: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    contents
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

fn symbol_counts(text: &str) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for symbol in text.chars() {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    counts
}

/// Keep only words whose symbols all occur in `phrase`, and no more often
/// than they do in `phrase`.
pub fn filter_words(words: &[String], phrase: &str) -> Vec<String> {
    let available = symbol_counts(phrase);
    words
        .iter()
        .filter(|word| {
            symbol_counts(word)
                .iter()
                .all(|(symbol, &count)| available.get(symbol).is_some_and(|&have| count <= have))
        })
        .cloned()
        .collect()
}

/// Weight of a symbol by how rarely it occurs in the phrase.
fn rarity_weight(occurrences: usize) -> u64 {
    match occurrences {
        0 => 0,
        1 => 200,
        2 => 125,
        _ => 50,
    }
}

/// Weight of a word: rarer symbols and longer words weigh more.
pub fn word_weight(word: &str, phrase_counts: &HashMap<char, usize>) -> u64 {
    word.chars()
        .map(|symbol| rarity_weight(phrase_counts.get(&symbol).copied().unwrap_or(0)))
        .sum()
}

/// Order words by descending weight. Equal weights keep their input order.
pub fn order_by_likelihood(words: Vec<String>, phrase: &str) -> Vec<String> {
    let phrase_counts = symbol_counts(&phrase.replace(' ', ""));
    let mut weighted: Vec<(String, u64)> = words
        .into_iter()
        .map(|word| {
            let weight = word_weight(&word, &phrase_counts);
            (word, weight)
        })
        .collect();
    weighted.sort_by(|a, b| b.1.cmp(&a.1));
    weighted.into_iter().map(|(word, _)| word).collect()
}
