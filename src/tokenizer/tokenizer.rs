//! Query tokenizer
//!
//! Splits a raw query on whitespace and normalizes each word:
//! trim, strip punctuation from both ends, drop apostrophes and commas,
//! lowercase. Words outside the length bounds are dropped, never truncated.
//! Duplicates keep their first position.

use std::collections::HashSet;

/// Characters stripped from both ends of every word
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 1;
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 100;

/// Tokenizer with inclusive token length bounds (in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    min_length: usize,
    max_length: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LENGTH, DEFAULT_MAX_TOKEN_LENGTH)
    }
}

impl Tokenizer {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Tokenizes a raw query into ordered, distinct tokens
    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut tokens = Vec::new();

        for word in raw.split_whitespace() {
            let token = normalize_word(word);
            if !self.within_bounds(&token) {
                continue;
            }
            if seen.insert(token.clone()) {
                tokens.push(token);
            }
        }

        tokens
    }

    /// Returns true if `token` is something `tokenize` could have produced
    pub fn is_well_formed(&self, token: &str) -> bool {
        self.within_bounds(token)
            && !token.chars().any(char::is_whitespace)
            && normalize_word(token) == token
    }

    fn within_bounds(&self, token: &str) -> bool {
        let length = token.chars().count();
        length >= self.min_length && length <= self.max_length
    }
}

/// Normalizes a single whitespace-free word
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .trim_matches(|c| PUNCTUATION.contains(c))
        .chars()
        .filter(|c| *c != '\'' && *c != ',')
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokenize() {
        let tokens = Tokenizer::default().tokenize("US Terminator 2 us 4.99 2014-01-01 01:02:03");
        assert_eq!(
            tokens,
            vec!["us", "terminator", "2", "4.99", "2014-01-01", "01:02:03"]
        );
    }

    #[test]
    fn test_strip_punctuation_ends_only() {
        let tokens = Tokenizer::default().tokenize("(hello) world! 3/9/18. ...");
        assert_eq!(tokens, vec!["hello", "world", "3/9/18"]);
    }

    #[test]
    fn test_apostrophes_and_commas_removed_inside() {
        let tokens = Tokenizer::default().tokenize("O'Brien 1,000 Mar 1, 2014");
        assert_eq!(tokens, vec!["obrien", "1000", "mar", "1", "2014"]);
    }

    #[test]
    fn test_dedup_keeps_first_position() {
        let tokens = Tokenizer::default().tokenize("bora Bora BORA bay");
        assert_eq!(tokens, vec!["bora", "bay"]);
    }

    #[test]
    fn test_length_bounds_inclusive() {
        let tokenizer = Tokenizer::new(2, 5);
        let tokens = tokenizer.tokenize("a ab abcde abcdef");
        assert_eq!(tokens, vec!["ab", "abcde"]);
    }

    #[test]
    fn test_length_counts_characters() {
        let tokenizer = Tokenizer::new(1, 4);
        assert_eq!(tokenizer.tokenize("café"), vec!["café"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   ").is_empty());
        assert!(tokenizer.tokenize("!!! ... ,,,").is_empty());
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let tokenizer = Tokenizer::default();
        let first = tokenizer.tokenize("Hello, World! It's 3/9/18 (again) hello");
        let second = tokenizer.tokenize(&first.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn test_well_formed() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.is_well_formed("hdbuy"));
        assert!(!tokenizer.is_well_formed("HDBUY"));
        assert!(!tokenizer.is_well_formed("two words"));
        assert!(!tokenizer.is_well_formed("trailing."));
        assert!(!tokenizer.is_well_formed(""));
    }
}
